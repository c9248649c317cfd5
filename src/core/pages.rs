//! Page names and `?page=` routing.

use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Sphere,
    Visualization,
    Explorer,
    Realms,
    Comics,
    Contact,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Sphere,
        Page::Visualization,
        Page::Explorer,
        Page::Realms,
        Page::Comics,
        Page::Contact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Page::Sphere => "sphere",
            Page::Visualization => "visualization",
            Page::Explorer => "explorer",
            Page::Realms => "realms",
            Page::Comics => "comics",
            Page::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Sphere => "Welcome to Myriad",
            Page::Visualization => "Quantum State Visualizer",
            Page::Explorer => "Interactive Bloch Sphere Explorer",
            Page::Realms => "Quantum Realms: The State Architect",
            Page::Comics => "Quantum Comics",
            Page::Contact => "Contact Us",
        }
    }

    /// Exact page name (case-insensitive) plus a few short aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let page = match name.trim().to_ascii_lowercase().as_str() {
            "sphere" | "home" | "landing" => Page::Sphere,
            "visualization" | "visualize" | "viz" => Page::Visualization,
            "explorer" | "explore" => Page::Explorer,
            "realms" => Page::Realms,
            "comics" => Page::Comics,
            "contact" => Page::Contact,
            _ => return None,
        };
        Some(page)
    }

    /// Route a query string such as `?page=realms` or `page=comics&x=1`.
    /// Anything missing or unknown lands on the sphere page.
    pub fn from_query(query: &str) -> Self {
        let q = query.trim();
        let q = q.rsplit_once('?').map(|(_, rest)| rest).unwrap_or(q);
        q.split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| k.trim() == "page")
            .and_then(|(_, v)| Self::from_name(v))
            .or_else(|| Self::from_name(q))
            .unwrap_or_default()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_routes() {
        for p in Page::ALL {
            assert_eq!(Page::from_query(&format!("?page={}", p.name())), p);
        }
    }

    #[test]
    fn unknown_or_missing_lands_on_sphere() {
        assert_eq!(Page::from_query(""), Page::Sphere);
        assert_eq!(Page::from_query("?page=nope"), Page::Sphere);
        assert_eq!(Page::from_query("?other=realms"), Page::Sphere);
    }

    #[test]
    fn full_urls_and_extra_params() {
        assert_eq!(Page::from_query("http://localhost:8501/?page=visualization"), Page::Visualization);
        assert_eq!(Page::from_query("?theme=dark&page=Comics"), Page::Comics);
        assert_eq!(Page::from_query("explore"), Page::Explorer);
    }
}
