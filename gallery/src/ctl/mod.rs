//! `galleryctl`, a thin command line front end over [`crate::client`].

pub mod args;
pub mod driver;
mod pretty;
