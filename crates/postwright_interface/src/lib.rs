//! Trait seams for Postwright.
//!
//! - [`PostwrightDriver`]: the contract both external model services satisfy
//! - [`PostRepository`]: the persistence collaborator used by review
//! - [`InMemoryPostRepository`]: a repository that keeps everything in memory

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod repository;
mod traits;

pub use memory::InMemoryPostRepository;
pub use repository::PostRepository;
pub use traits::PostwrightDriver;
