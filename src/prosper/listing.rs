use std::convert::From;

use crate::error::Result;
use crate::listing::{AccessToken, Api, Listing, ListingPage};

impl From<super::api::TokenResponse> for AccessToken {
    fn from(item: super::api::TokenResponse) -> Self {
        Self {
            token: item.access_token,
            token_type: item.token_type,
            expires_in: item.expires_in,
        }
    }
}

impl From<super::api::ListingRecord> for Listing {
    fn from(item: super::api::ListingRecord) -> Self {
        Self {
            member_key: item.member_key.unwrap_or_default(),
            listing_number: item.listing_number,
            listing_amount: item.listing_amount.unwrap_or_default(),
            amount_remaining: item.amount_remaining.unwrap_or_default(),
            dti_wprosper_loan: item.dti_wprosper_loan.unwrap_or_default(),
            prior_prosper_loans: item.prior_prosper_loans.unwrap_or_default(),
            effective_yield: item.effective_yield.unwrap_or_default(),
            prosper_rating: item.prosper_rating.unwrap_or_default(),
        }
    }
}

impl From<super::api::ListingsResponse> for ListingPage {
    fn from(item: super::api::ListingsResponse) -> Self {
        Self {
            count: item.result_count,
            results: item.result.into_iter().map(|l| l.into()).collect(),
        }
    }
}

impl Api for super::Client {
    fn authenticate(&self) -> Result<AccessToken> {
        Ok(self.token()?.into())
    }

    fn listings(&self, filter: Option<&str>, token: &str) -> Result<ListingPage> {
        Ok(self.search_listings(filter, token)?.into())
    }

    fn default_filter(&self) -> &str {
        self.default_filter.as_str()
    }
}
