pub mod handle;
pub mod rc;
