use url::Url;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ConfigFeatureService: Send + Sync + 'static {
    /// Public settings the website needs to render the contact page.
    fn get_site_config(&self) -> SiteConfig;

    /// Embed url of the booking widget, optionally preselecting a service.
    ///
    /// Returns `None` if no booking widget is configured.
    fn get_booking_url(&self, service: Option<String>) -> Option<Url>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub phone: String,
    pub booking: Option<BookingScript>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingScript {
    pub business_id: String,
    pub script_url: Url,
}

#[cfg(feature = "mock")]
impl MockConfigFeatureService {
    pub fn with_get_site_config(mut self, result: SiteConfig) -> Self {
        self.expect_get_site_config()
            .once()
            .return_once(move || result);
        self
    }

    pub fn with_get_booking_url(mut self, service: Option<String>, result: Option<Url>) -> Self {
        self.expect_get_booking_url()
            .once()
            .with(mockall::predicate::eq(service))
            .return_once(move |_| result);
        self
    }
}
