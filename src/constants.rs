/// User agent string used in HTTP requests to identify this client to the 3C Plus API
pub const USER_AGENT: &str = "threec-client/0.1.0";
/// Base URL used when neither explicit configuration nor `THREEC_BASE_URL` provide one
pub const DEFAULT_BASE_URL: &str = "http://app.3c.fluxoti.com.br/api/v1";
/// Default request timeout in seconds for authentication calls
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 15;
/// Default request timeout in seconds for mailing calls
pub const DEFAULT_MAILING_TIMEOUT_SECS: u64 = 20;
/// Default number of attempts per request, first try included
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Base delay in milliseconds for exponential backoff; attempt `k` waits `base * 2^(k-1)`
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;
/// Upper bound (exclusive) in milliseconds of the random jitter added to every backoff wait
pub const DEFAULT_RETRY_JITTER_MS: u64 = 100;
/// Maximum number of phone numbers a single contact may carry
pub const MAX_PHONES_PER_CONTACT: usize = 20;
/// Header carrying the per-call idempotency key on write requests
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "THREEC_BASE_URL";
/// Environment variable holding the login user
pub const ENV_USER: &str = "THREEC_USER";
/// Environment variable holding the login password
pub const ENV_PASSWORD: &str = "THREEC_PASSWORD";
/// Environment variable holding the numeric company id
pub const ENV_COMPANY_ID: &str = "THREEC_COMPANY_ID";
/// Environment variable holding the company domain
pub const ENV_COMPANY_DOMAIN: &str = "THREEC_COMPANY_DOMAIN";
