use reqwest::blocking::{Request, Response};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize};

use super::deserializer::decimal_from_val_option;
use super::Client;
use crate::error::{Error, Result};

pub const DEFAULT_FILTER: &str = "biddable=true&sort_by=effective_yield&amount_remaining_max=1000";

static TOKEN_PATH: &str = "/v1/security/oauth/token";
static LISTINGS_PATH: &str = "/listingsvc/v2/listings";
static FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
static JSON: &str = "application/json";

// Rejected credentials come back as an error document; every field defaults
// so such a body still decodes.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub(super) struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(super) struct ListingsResponse {
    pub result_count: u64,
    pub result: Vec<ListingRecord>,
}

// Only `listing_number` is required. Every other field may be null or absent.
#[derive(Deserialize, Debug, PartialEq)]
pub(super) struct ListingRecord {
    #[serde(default)]
    pub member_key: Option<String>,
    pub listing_number: u64,
    #[serde(default, deserialize_with = "decimal_from_val_option")]
    pub listing_amount: Option<f64>,
    #[serde(default, deserialize_with = "decimal_from_val_option")]
    pub amount_remaining: Option<f64>,
    #[serde(default, deserialize_with = "decimal_from_val_option")]
    pub dti_wprosper_loan: Option<f64>,
    #[serde(default)]
    pub prior_prosper_loans: Option<u32>,
    #[serde(default, deserialize_with = "decimal_from_val_option")]
    pub effective_yield: Option<f64>,
    #[serde(default)]
    pub prosper_rating: Option<String>,
}

impl Client {
    pub(super) fn token(&self) -> Result<TokenResponse> {
        let request = self.token_request()?;
        self.execute(request)
    }

    pub(super) fn search_listings(
        &self,
        filter: Option<&str>,
        token: &str,
    ) -> Result<ListingsResponse> {
        let request = self.listings_request(filter, token)?;
        self.execute(request)
    }

    fn token_request(&self) -> Result<Request> {
        let payload = format!(
            "grant_type=client_credentials&client_id={}&client_secret={}",
            self.client_id.expose_secret(),
            self.client_secret.expose_secret(),
        );
        let url = format!("{}{}", self.base_url, TOKEN_PATH);

        self.client
            .post(&url)
            .header(CONTENT_TYPE, FORM_URLENCODED)
            .header(ACCEPT, JSON)
            .body(payload)
            .build()
            .map_err(|source| Error::Request { url, source })
    }

    /// The filter goes into the query string untouched; the request has no body.
    fn listings_request(&self, filter: Option<&str>, token: &str) -> Result<Request> {
        let filter = match filter {
            Some(f) if !f.is_empty() => f,
            _ => DEFAULT_FILTER,
        };
        let url = format!("{}{}?{}", self.base_url, LISTINGS_PATH, filter);
        let authorization = HeaderValue::from_str(format!("bearer {}", token).as_str())?;

        self.client
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, JSON)
            .build()
            .map_err(|source| Error::Request { url, source })
    }

    fn execute<D>(&self, request: Request) -> Result<D>
    where
        D: DeserializeOwned,
    {
        let url = request.url().to_string();
        log::debug!("{} {}", request.method(), url);

        match self.client.execute(request) {
            Ok(response) => self.response_body(url, response),
            Err(source) => Err(Error::Transport { url, source }),
        }
    }

    fn response_body<D>(&self, url: String, response: Response) -> Result<D>
    where
        D: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            log::warn!("{} answered {:?}, decoding body anyway", url, status);
        }

        let body = match response.text() {
            Ok(body) => body,
            Err(source) => return Err(Error::Body { url, source }),
        };

        match serde_json::from_str(body.as_str()) {
            Ok(d) => Ok(d),
            Err(source) => Err(Error::Decode { url, body, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListingRecord, ListingsResponse, TokenResponse, DEFAULT_FILTER};
    use crate::config::Config;
    use crate::error::Error;
    use crate::prosper::Client;
    use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
    use serde_test::{assert_de_tokens, Token};

    fn client() -> Client {
        let config = Config::new("my-id", "my-secret").with_base_url("http://localhost:9");
        Client::from(&config)
    }

    #[test]
    fn token_request_shape() {
        let request = client().token_request().unwrap();

        assert_eq!(request.method(), "POST");
        assert_eq!(
            request.url().as_str(),
            "http://localhost:9/v1/security/oauth/token"
        );
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(request.headers()[ACCEPT], "application/json");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(
            body,
            b"grant_type=client_credentials&client_id=my-id&client_secret=my-secret"
        );
    }

    #[test]
    fn token_request_passes_empty_credentials_through() {
        let client = Client::from(&Config::default().with_base_url("http://localhost:9"));
        let request = client.token_request().unwrap();

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"grant_type=client_credentials&client_id=&client_secret=");
    }

    #[test]
    fn listings_request_default_filter() {
        let client = client();

        for filter in [None, Some("")] {
            let request = client.listings_request(filter, "abc").unwrap();
            assert_eq!(request.method(), "GET");
            assert_eq!(request.url().path(), "/listingsvc/v2/listings");
            assert_eq!(request.url().query(), Some(DEFAULT_FILTER));
        }
    }

    #[test]
    fn listings_request_keeps_filter_verbatim() {
        let filter = "sort_by=listing_amount&biddable=true&prosper_rating=AA,A";
        let request = client().listings_request(Some(filter), "abc").unwrap();

        assert_eq!(request.url().query(), Some(filter));
    }

    #[test]
    fn listings_request_authorization() {
        let client = client();

        for token in ["abc", "", "not.a.real.jwt"] {
            let request = client.listings_request(None, token).unwrap();
            assert_eq!(
                request.headers()[AUTHORIZATION],
                format!("bearer {}", token).as_str()
            );
            assert_eq!(request.headers()[ACCEPT], "application/json");
        }
    }

    #[test]
    fn listings_request_has_no_body() {
        let request = client().listings_request(None, "abc").unwrap();

        assert!(request.body().is_none());
    }

    #[test]
    fn base_url_from_file_drops_trailing_slash() {
        let path = std::env::temp_dir().join("prosper-listings-trailing-slash.toml");
        std::fs::write(&path, "base_url = \"http://localhost:9/\"\n").unwrap();

        let config = Config::from_file(path.to_str().unwrap()).unwrap();
        let client = Client::from(config.as_ref());
        std::fs::remove_file(path).unwrap();

        let token = client.token_request().unwrap();
        assert_eq!(token.url().path(), "/v1/security/oauth/token");

        let listings = client.listings_request(None, "abc").unwrap();
        assert_eq!(listings.url().path(), "/listingsvc/v2/listings");
    }

    #[test]
    fn malformed_base_url_is_a_request_error() {
        let client = Client::from(&Config::default().with_base_url("not a url"));

        let err = client.token_request().unwrap_err();
        assert!(matches!(err, Error::Request { .. }));

        let err = client.listings_request(None, "abc").unwrap_err();
        assert!(matches!(err, Error::Request { .. }));
    }

    #[test]
    fn listings_request_rejects_unsendable_token() {
        let err = client().listings_request(None, "abc\r\ndef").unwrap_err();

        assert!(matches!(err, Error::Header(_)));
    }

    #[test]
    fn de_token_response() {
        assert_de_tokens(
            &TokenResponse {
                access_token: "abc".to_string(),
                token_type: "bearer".to_string(),
                expires_in: 3600,
            },
            &[
                Token::Struct {
                    name: "TokenResponse",
                    len: 3,
                },
                Token::Str("access_token"),
                Token::Str("abc"),
                Token::Str("token_type"),
                Token::Str("bearer"),
                Token::Str("expires_in"),
                Token::I64(3600),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn de_rejected_token_response() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"code":"invalid_client","error":"Bad client credentials"}"#,
        )
        .unwrap();

        assert_eq!(token, TokenResponse::default());
    }

    #[test]
    fn de_listings_response() {
        let page: ListingsResponse = serde_json::from_str(
            r#"{
                "result_count": 2,
                "result": [{
                    "member_key": "m1",
                    "listing_number": 100,
                    "listing_amount": 2500,
                    "amount_remaining": "750.00",
                    "dti_wprosper_loan": null,
                    "effective_yield": 0.1234,
                    "prosper_rating": "C",
                    "listing_title": "Debt consolidation"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(page.result_count, 2);
        assert_eq!(
            page.result,
            vec![ListingRecord {
                member_key: Some("m1".to_string()),
                listing_number: 100,
                listing_amount: Some(2500.0),
                amount_remaining: Some(750.0),
                dti_wprosper_loan: None,
                prior_prosper_loans: None,
                effective_yield: Some(0.1234),
                prosper_rating: Some("C".to_string()),
            }]
        );
    }

    #[test]
    fn de_listing_with_null_fields() {
        let page: ListingsResponse = serde_json::from_str(
            r#"{"result_count":1,"result":[{
                "member_key": null,
                "listing_number": 7,
                "listing_amount": null,
                "amount_remaining": null,
                "dti_wprosper_loan": null,
                "prior_prosper_loans": null,
                "effective_yield": null,
                "prosper_rating": null
            }]}"#,
        )
        .unwrap();

        assert_eq!(
            page.result,
            vec![ListingRecord {
                member_key: None,
                listing_number: 7,
                listing_amount: None,
                amount_remaining: None,
                dti_wprosper_loan: None,
                prior_prosper_loans: None,
                effective_yield: None,
                prosper_rating: None,
            }]
        );
    }

    #[test]
    fn de_listing_without_number() {
        let err = serde_json::from_str::<ListingsResponse>(
            r#"{"result_count":1,"result":[{"member_key":"m1"}]}"#,
        )
        .unwrap_err();

        assert_eq!(err.classify(), serde_json::error::Category::Data);
    }
}
