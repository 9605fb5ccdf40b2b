//! Convolution filters and kernel builders.
//!
//! Kernel construction is pure; callers that filter repeatedly with the same
//! parameters can memoize through [`KernelCache`] instead of relying on any
//! hidden global state.

mod kernels;
mod separable;

pub use kernels::{gaussian_kernel, gaussian_kernel_1d, KernelCache};
pub use separable::{gaussian_blur, separable_filter};
