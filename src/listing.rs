use serde::Serialize;

use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Listing {
    pub member_key: String,
    pub listing_number: u64,
    pub listing_amount: f64,
    pub amount_remaining: f64,
    pub dti_wprosper_loan: f64,
    pub prior_prosper_loans: u32,
    pub effective_yield: f64,
    pub prosper_rating: String,
}

/// One fetch worth of listings. `count` is what the server reported and is
/// not checked against `results.len()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ListingPage {
    pub count: u64,
    pub results: Vec<Listing>,
}

pub trait Api: std::fmt::Debug + Send + Sync {
    fn authenticate(&self) -> Result<AccessToken>;
    fn listings(&self, filter: Option<&str>, token: &str) -> Result<ListingPage>;
    fn default_filter(&self) -> &str;
}
