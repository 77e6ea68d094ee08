//! Volatility surface grid
//!
//! Rectangular expiry × strike grid of mean implied volatilities built
//! from a filtered quote batch. Cells with no contributing quotes hold
//! `None`; the grid always covers the full cross product of the observed
//! axes.

use chrono::NaiveDate;
use ndarray::Array2;
use std::cmp::Ordering;

use super::quote::Quote;

/// Implied volatility surface on an expiry × strike grid
#[derive(Debug, Clone, PartialEq)]
pub struct VolSurface {
    /// Distinct expiries, ascending (grid rows)
    pub expiries: Vec<NaiveDate>,
    /// Distinct strikes, ascending (grid columns)
    pub strikes: Vec<f64>,
    /// Mean implied vol per cell, `None` where no quote contributed
    pub vols: Array2<Option<f64>>,
}

impl VolSurface {
    /// Build a surface from quotes, or `None` when there is nothing to show
    ///
    /// `None` covers both an empty batch and a batch whose cells would all
    /// be missing. A quote missing its expiry, strike, or vol contributes
    /// no cell value. The same input always yields the same grid.
    pub fn from_quotes(quotes: &[Quote]) -> Option<Self> {
        let expiries = distinct_expiries(quotes);
        let strikes = distinct_strikes(quotes);
        if expiries.is_empty() || strikes.is_empty() {
            return None;
        }

        let shape = (expiries.len(), strikes.len());
        let mut sums = Array2::<f64>::zeros(shape);
        let mut counts = Array2::<u32>::zeros(shape);

        for q in quotes {
            let (Some(expiry), Some(strike), Some(vol)) = (q.expiry, q.strike, q.implied_vol)
            else {
                continue;
            };
            // Upstream filtering already drops bad vols; skip again rather
            // than let a NaN poison a cell mean.
            if !vol.is_finite() {
                continue;
            }
            let Some(row) = expiries.iter().position(|&e| e == expiry) else {
                continue;
            };
            let Some(col) = strikes.iter().position(|&k| k == strike) else {
                continue;
            };

            sums[[row, col]] += vol;
            counts[[row, col]] += 1;
        }

        let mut vols = Array2::from_elem(shape, None);
        let mut populated = 0usize;
        for ((row, col), &count) in counts.indexed_iter() {
            if count > 0 {
                vols[[row, col]] = Some(sums[[row, col]] / count as f64);
                populated += 1;
            }
        }

        if populated == 0 {
            return None;
        }

        Some(Self {
            expiries,
            strikes,
            vols,
        })
    }

    /// Grid shape as (expiries, strikes)
    pub fn shape(&self) -> (usize, usize) {
        (self.expiries.len(), self.strikes.len())
    }

    /// Cell value at an exact (expiry, strike) pair
    pub fn cell(&self, expiry: NaiveDate, strike: f64) -> Option<f64> {
        let row = self.expiries.iter().position(|&e| e == expiry)?;
        let col = self.strikes.iter().position(|&k| k == strike)?;
        self.vols[[row, col]]
    }

    /// (strike, vol) pairs for one expiry, skipping missing cells
    pub fn smile(&self, expiry: NaiveDate) -> Vec<(f64, f64)> {
        let Some(row) = self.expiries.iter().position(|&e| e == expiry) else {
            return Vec::new();
        };

        self.strikes
            .iter()
            .enumerate()
            .filter_map(|(col, &strike)| self.vols[[row, col]].map(|vol| (strike, vol)))
            .collect()
    }

    /// Number of cells holding a value
    pub fn populated_cells(&self) -> usize {
        self.vols.iter().filter(|v| v.is_some()).count()
    }

    /// Smallest and largest cell value on the grid
    pub fn vol_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for vol in self.vols.iter().flatten() {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(*vol), hi.max(*vol)),
                None => (*vol, *vol),
            });
        }
        range
    }
}

/// Distinct expiries in a batch, ascending
fn distinct_expiries(quotes: &[Quote]) -> Vec<NaiveDate> {
    let mut expiries: Vec<NaiveDate> = quotes.iter().filter_map(|q| q.expiry).collect();
    expiries.sort();
    expiries.dedup();
    expiries
}

/// Distinct finite strikes in a batch, ascending
fn distinct_strikes(quotes: &[Quote]) -> Vec<f64> {
    let mut strikes: Vec<f64> = quotes
        .iter()
        .filter_map(|q| q.strike)
        .filter(|k| k.is_finite())
        .collect();
    strikes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    strikes.dedup();
    strikes
}
