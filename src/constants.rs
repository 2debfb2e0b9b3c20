pub mod network {
    pub const TIMEOUT_VENDOR_REQUEST_MS: u64 = 30_000;
}

pub mod server {
    pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
}

pub mod pagination {
    /// Page size used when draining the full deal collection.
    pub const DRAIN_PAGE_SIZE: u64 = 500;
    /// Fail-safe cap on drained pages; the vendor's more-items flag alone
    /// does not guarantee termination.
    pub const MAX_DRAIN_PAGES: usize = 100;
}

pub mod deals {
    pub const DEFAULT_LIST_STATUS: &str = "open";
    pub const DEFAULT_LIST_LIMIT: u64 = 50;
    pub const DEFAULT_DRAIN_STATUS: &str = "all_not_deleted";
    pub const DEFAULT_RISK_STATUS: &str = "open";
    /// Statuses counted by analyzePipeline unless the caller overrides them.
    pub const COUNT_STATUSES: &[&str] = &["open", "won", "lost"];
}

pub mod activities {
    pub const DEFAULT_LIST_LIMIT: u64 = 100;
}
