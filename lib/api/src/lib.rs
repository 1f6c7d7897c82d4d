//! # propX API
//!
//! REST surface for the propX service. A thin consumer of the
//! [`QueryFacade`](propx_engine::QueryFacade): every handler maps one
//! request to one facade call and one error kind to one status code.

pub mod rest;

pub use rest::RestApi;
