/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::ConvolutionError;

/// A pair of one-dimensional filters applied along rows and columns.
///
/// Coefficients are stored as `f64`, all accumulation happens in `f64` as well.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeparableFilter {
    row: Vec<f64>,
    column: Vec<f64>,
    name: String,
}

impl SeparableFilter {
    pub fn new(row: Vec<f64>, column: Vec<f64>) -> SeparableFilter {
        SeparableFilter {
            row,
            column,
            name: String::new(),
        }
    }

    /// Same coefficients along both axes.
    pub fn symmetric(coefficients: Vec<f64>) -> SeparableFilter {
        SeparableFilter::new(coefficients.clone(), coefficients)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> SeparableFilter {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn row_filter(&self) -> &[f64] {
        &self.row
    }

    #[inline]
    pub fn column_filter(&self) -> &[f64] {
        &self.column
    }

    /// Number of row coefficients.
    #[inline]
    pub fn size(&self) -> usize {
        self.row.len()
    }

    /// Filter without coefficients along either axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row.is_empty() || self.column.is_empty()
    }

    #[inline]
    pub fn row_weight(&self) -> f64 {
        self.row.iter().sum()
    }

    #[inline]
    pub fn column_weight(&self) -> f64 {
        self.column.iter().sum()
    }

    /// Sum of the equivalent two-dimensional kernel.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.row_weight() * self.column_weight()
    }

    /// A filter is high-pass when its non-zero coefficients change sign, scanning the row
    /// coefficients followed by the column coefficients.
    ///
    /// A positive row with a negative column is high-pass as well.
    pub fn is_high_pass(&self) -> bool {
        has_sign_change(self.row.iter().chain(self.column.iter()))
    }

    /// Both axes use the same coefficients.
    pub fn same_coefficients(&self) -> bool {
        self.row == self.column
    }

    /// Each axis reads the same backwards as forwards.
    pub fn is_symmetric(&self) -> bool {
        is_symmetric_1d(&self.row) && is_symmetric_1d(&self.column)
    }

    pub(crate) fn validate(&self) -> Result<(), ConvolutionError> {
        if self.is_empty() {
            return Err(ConvolutionError::EmptyFilter);
        }
        if self.row.len() % 2 == 0 {
            return Err(ConvolutionError::OddKernel(self.row.len()));
        }
        if self.column.len() % 2 == 0 {
            return Err(ConvolutionError::OddKernel(self.column.len()));
        }
        Ok(())
    }
}

fn has_sign_change<'a>(coefficients: impl Iterator<Item = &'a f64>) -> bool {
    let mut sign = 0f64;
    for &x in coefficients.filter(|&&x| x != 0.) {
        if sign != 0. && x.signum() != sign {
            return true;
        }
        sign = x.signum();
    }
    false
}

pub(crate) fn is_symmetric_1d(kernel: &[f64]) -> bool {
    let len = kernel.len();
    let fw = kernel.iter().take(len / 2);
    let bw = kernel.iter().rev().take(len / 2);
    fw.zip(bw).all(|(f, b)| f == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights() {
        let filter = SeparableFilter::new(vec![1., 2., 1.], vec![1., 4., 6., 4., 1.]);
        assert_eq!(filter.row_weight(), 4.);
        assert_eq!(filter.column_weight(), 16.);
        assert_eq!(filter.weight(), 64.);
        assert_eq!(filter.size(), 3);
        assert!(!filter.same_coefficients());
        assert!(filter.is_symmetric());
        assert!(!filter.is_high_pass());
    }

    #[test]
    fn test_high_pass_detection() {
        let filter = SeparableFilter::symmetric(vec![-1., 3., -1.]);
        assert!(filter.is_high_pass());
        assert_eq!(filter.weight(), 1.);
        let filter = SeparableFilter::new(vec![0., 1., 0.], vec![-1., 0., 1.]);
        assert!(filter.is_high_pass());
        assert!(!filter.is_symmetric());
        let filter = SeparableFilter::symmetric(vec![-1., -2., -1.]);
        assert!(!filter.is_high_pass());
        let filter = SeparableFilter::new(vec![1., 2., 1.], vec![-1., -2., -1.]);
        assert!(filter.is_high_pass());
        assert_eq!(filter.weight(), -16.);
        let filter = SeparableFilter::new(vec![0., 1., 0.], vec![0., 2., 0.]);
        assert!(!filter.is_high_pass());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            SeparableFilter::default().validate(),
            Err(ConvolutionError::EmptyFilter)
        );
        assert_eq!(
            SeparableFilter::new(vec![1.], vec![1., 1.]).validate(),
            Err(ConvolutionError::OddKernel(2))
        );
        assert!(SeparableFilter::symmetric(vec![1.])
            .with_name("identity")
            .validate()
            .is_ok());
    }
}
