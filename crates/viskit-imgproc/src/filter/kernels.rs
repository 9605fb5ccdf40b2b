use std::collections::HashMap;

/// Create a normalized 1-D Gaussian kernel of a given length.
///
/// # Arguments
///
/// * `kernel_size` - The number of taps.
/// * `sigma` - The standard deviation of the Gaussian.
///
/// # Returns
///
/// A vector of taps summing to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mean = (kernel_size - 1) as f32 / 2.0;
    let denom = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - mean;
            (-(x * x) / denom).exp()
        })
        .collect();

    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Create a normalized 1-D Gaussian kernel sized from `sigma`.
///
/// The length covers three standard deviations on each side, forced odd so
/// the kernel has a center tap.
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let kernel_size = ((6.0 * sigma) as usize) | 1;
    gaussian_kernel_1d(kernel_size, sigma)
}

/// Caller-owned memoization of Gaussian kernels.
///
/// Kernel construction is a pure function; callers that blur with the same
/// parameters repeatedly can hold one of these instead of rebuilding the
/// taps every frame. Keyed by length and the exact bit pattern of `sigma`.
#[derive(Debug, Default)]
pub struct KernelCache {
    kernels: HashMap<(usize, u32), Vec<f32>>,
}

impl KernelCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The kernel for `(kernel_size, sigma)`, building it on first use.
    pub fn get(&mut self, kernel_size: usize, sigma: f32) -> &[f32] {
        self.kernels
            .entry((kernel_size, sigma.to_bits()))
            .or_insert_with(|| gaussian_kernel_1d(kernel_size, sigma))
    }

    /// Number of distinct kernels held.
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// True if no kernels are held.
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}
