use url::Url;

/// Third-party booking widget, embedded by the site as an alternative to the
/// contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWidget {
    pub business_id: String,
    pub script_url: Url,
    pub embed_url: Url,
}

impl BookingWidget {
    /// Embed url for this business, optionally preselecting a service.
    pub fn embed_url_for(&self, service: Option<&str>) -> Url {
        let mut url = self.embed_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("business", &self.business_id);
            if let Some(service) = service.filter(|s| !s.is_empty()) {
                query.append_pair("service", service);
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> BookingWidget {
        BookingWidget {
            business_id: "clinic-42".into(),
            script_url: "https://booking.example.com/widget.js".parse().unwrap(),
            embed_url: "https://booking.example.com/embed".parse().unwrap(),
        }
    }

    #[test]
    fn embed_url_without_service() {
        assert_eq!(
            widget().embed_url_for(None).as_str(),
            "https://booking.example.com/embed?business=clinic-42"
        );
        assert_eq!(
            widget().embed_url_for(Some("")).as_str(),
            "https://booking.example.com/embed?business=clinic-42"
        );
    }

    #[test]
    fn embed_url_with_service() {
        assert_eq!(
            widget().embed_url_for(Some("pilates & rehab")).as_str(),
            "https://booking.example.com/embed?business=clinic-42&service=pilates+%26+rehab"
        );
    }
}
