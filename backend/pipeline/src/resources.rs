//! Curated web-resource lookup.
//!
//! A stand-in for a real search backend: maps coarse query categories to
//! static resource lists and simulates remote latency. Categories are
//! checked in a fixed priority order and only the first match is used,
//! so "donate" wins over "help" even when both appear.

use std::time::Duration;

use chol_core::ResourceLink;

fn link(title: &str, url: &str, description: &str) -> ResourceLink {
    ResourceLink {
        title: title.into(),
        url: url.into(),
        description: description.into(),
    }
}

fn donation_resources() -> Vec<ResourceLink> {
    vec![
        link(
            "Ways to Give - Uyir Mei",
            "/give",
            "Explore different ways to donate to our cause.",
        ),
        link(
            "Impact of Your Donation",
            "/impact",
            "See how your donations make a difference in lives.",
        ),
        link(
            "Tax Benefits for Donors",
            "/tax-benefits",
            "Learn about tax benefits available for your donations.",
        ),
    ]
}

fn volunteer_resources() -> Vec<ResourceLink> {
    vec![
        link(
            "Volunteer Opportunities - Uyir Mei",
            "/get-involved",
            "Find volunteer opportunities that match your skills.",
        ),
        link(
            "Volunteer Training Programs",
            "/volunteer-training",
            "Access our specialized training programs for volunteers.",
        ),
        link(
            "Volunteer Success Stories",
            "/volunteer-stories",
            "Read inspiring stories from our volunteers.",
        ),
    ]
}

fn contact_resources() -> Vec<ResourceLink> {
    vec![
        link("Contact Us - Uyir Mei", "/contact", "Get in touch with our team."),
        link(
            "Office Locations",
            "/locations",
            "Find our offices across different regions.",
        ),
    ]
}

fn service_resources() -> Vec<ResourceLink> {
    vec![
        link(
            "Our Services - Uyir Mei",
            "/services",
            "Learn about our education, healthcare, and community development programs.",
        ),
        link(
            "Eligibility Criteria",
            "/eligibility",
            "Check if you're eligible for our support services.",
        ),
        link(
            "Success Stories",
            "/success-stories",
            "Read about people we've helped through our programs.",
        ),
    ]
}

/// Find curated resources for a query, with a simulated search delay.
///
/// `delay` models the latency of a real search backend; pass
/// `Duration::ZERO` when wired to one (or in tests).
pub async fn find_resources(query: &str, delay: Duration) -> Vec<ResourceLink> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let query_lower = query.to_lowercase();
    if query_lower.contains("donate") {
        donation_resources()
    } else if query_lower.contains("volunteer") {
        volunteer_resources()
    } else if query_lower.contains("contact") {
        contact_resources()
    } else if query_lower.contains("services") || query_lower.contains("help") {
        service_resources()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn find(query: &str) -> Vec<ResourceLink> {
        find_resources(query, Duration::ZERO).await
    }

    #[tokio::test]
    async fn test_donate_category() {
        let links = find("I want to donate money").await;
        assert!(!links.is_empty());
        assert!(links[0].title.contains("Ways to Give"));
    }

    #[tokio::test]
    async fn test_unrelated_query_is_empty() {
        assert!(find("random unrelated text").await.is_empty());
    }

    #[tokio::test]
    async fn test_donate_takes_precedence_over_help() {
        let links = find("help me donate").await;
        assert!(links[0].title.contains("Ways to Give"));
    }

    #[tokio::test]
    async fn test_volunteer_category() {
        let links = find("volunteer opportunities?").await;
        assert!(links[0].title.contains("Volunteer"));
    }

    #[tokio::test]
    async fn test_contact_category() {
        let links = find("how do I contact you").await;
        assert_eq!(links.len(), 2);
        assert!(links[0].url.contains("/contact"));
    }

    #[tokio::test]
    async fn test_help_maps_to_services() {
        let links = find("I need help").await;
        assert!(links[0].url.contains("/services"));
    }
}
