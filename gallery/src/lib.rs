//! Client library for the Gallery workflow automation REST API.
//!
//! Gallery exposes admin, workflow and job endpoints behind OAuth 2.0 client credentials.
//! This crate takes care of minting and refreshing bearer tokens and gives every endpoint
//! a typed wrapper, so callers never build HTTP requests by hand.
//!
//! # Getting started
//! - Authentication schemes [`crate::auth`]
//! - Endpoint wrappers [`crate::client`]
//! - Client CLI, `galleryctl`, configured through `GALLERY_*` environment variables
//!
//! # Example
//! Queue a job for a workflow and poll it once.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gallery::auth::{ClientSecret, Credentials, OAuth2};
//! use gallery::client::{Gallery, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let oauth = OAuth2::new(Credentials::new(
//!         "client-id",
//!         ClientSecret::new("client-secret"),
//!         "https://gallery.example.com/webapi/oauth2/token",
//!     ));
//!
//!     let gallery = Gallery::new("https://gallery.example.com/webapi", Arc::new(oauth));
//!
//!     let job: serde_json::Value = gallery
//!         .workflows()
//!         .post_jobs("my-app-id", [("Region", "EMEA")], RequestOptions::new())
//!         .await
//!         .unwrap()
//!         .json()
//!         .await
//!         .unwrap();
//!
//!     let status = gallery
//!         .jobs()
//!         .get_job(job["id"].as_str().unwrap(), RequestOptions::new())
//!         .await
//!         .unwrap();
//!
//!     println!("{}", status.text().await.unwrap());
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod ctl;
