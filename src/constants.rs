// ABOUTME: Application constants for platform identifiers, endpoints, and renewal schedules
// ABOUTME: Centralizes default URLs, API paths, headers, and timing values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Platform identifiers accepted in routes
pub mod platforms {
    /// AnotaAI platform identifier
    pub const ANOTAAI: &str = "anotaai";
    /// DeliveryVip platform identifier
    pub const DELIVERYVIP: &str = "deliveryvip";
}

/// AnotaAI API details
pub mod anotaai {
    /// Production base URL
    pub const DEFAULT_BASE_URL: &str = "https://integration-admin.api.anota.ai";
    /// Login endpoint path
    pub const LOGIN_PATH: &str = "/noauth/partner/login";
    /// Activate endpoint path prefix (store id appended)
    pub const ACTIVATE_PATH: &str = "/partnerauth/partner/active";
    /// Block endpoint path prefix (store id appended)
    pub const DEACTIVATE_PATH: &str = "/partnerauth/partner/block";
    /// Page listing endpoint path
    pub const LIST_PAGES_PATH: &str = "/partnerauth/partner/listpages/v2";
    /// Page size requested from the listing endpoint
    pub const LIST_PAGES_LIMIT: u32 = 2000;
    /// Token renewal period (3 hours)
    pub const TOKEN_RENEWAL_SECS: u64 = 3 * 60 * 60;
}

/// DeliveryVip API details
pub mod deliveryvip {
    /// Production base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.deliveryvip.com";
    /// OAuth token endpoint path
    pub const TOKEN_PATH: &str = "/authentication/v1/oauth/token";
    /// Merchants collection path
    pub const MERCHANTS_PATH: &str = "/partner/v2/merchants";
    /// Subscription status of a merchant that may take orders
    pub const ACTIVATED_STATUS: &str = "ACTIVATED";
    /// Token renewal period (20 hours, tokens expire after 24)
    pub const TOKEN_RENEWAL_SECS: u64 = 20 * 60 * 60;
}

/// Outbound HTTP defaults
pub mod http_client {
    /// Per-call request timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Connection timeout
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Inbound HTTP details
pub mod server {
    /// Default listener port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
    /// Header carrying the comma-separated store ids of a status query
    pub const STORE_IDS_HEADER: &str = "x-store-ids";
}

/// Service identity used in logs
pub mod service_names {
    /// Service name
    pub const DELIVERY_CONTROL: &str = "delivery-control";
}
