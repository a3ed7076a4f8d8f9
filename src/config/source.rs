/// Yahoo Finance chart endpoint settings.
pub struct YahooConfig {
    pub base_url: &'static str,
    pub chart_path: &'static str,
    /// Yahoo rejects requests without a browser-like agent.
    pub user_agent: &'static str,
    pub timeout_ms: u64,
}

pub const YAHOO: YahooConfig = YahooConfig {
    base_url: "https://query1.finance.yahoo.com",
    chart_path: "/v8/finance/chart",
    user_agent: "Mozilla/5.0 (X11; Linux x86_64) b3-dashboard",
    timeout_ms: 15_000,
};
