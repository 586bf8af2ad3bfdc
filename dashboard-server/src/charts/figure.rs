//! Chart-ready figure types
//!
//! A minimal figure representation matching the JSON shape the browser
//! charting library consumes: a list of traces plus a layout title.
//! Aggregation fills these in; rendering happens client-side.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter {
        x: Vec<String>,
        y: Vec<u64>,
        mode: String,
    },
    Bar {
        x: Vec<String>,
        y: Vec<u64>,
    },
    Choropleth {
        locations: Vec<String>,
        z: Vec<u64>,
        locationmode: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

impl Figure {
    /// An empty figure carrying only a placeholder title.
    pub fn placeholder(title: &str) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout::titled(title),
        }
    }

    pub fn line(title: &str, x: Vec<String>, y: Vec<u64>) -> Self {
        Self {
            data: vec![Trace::Scatter {
                x,
                y,
                mode: "lines".to_string(),
            }],
            layout: Layout::titled(title),
        }
    }

    pub fn bar(title: &str, x: Vec<String>, y: Vec<u64>) -> Self {
        Self {
            data: vec![Trace::Bar { x, y }],
            layout: Layout::titled(title),
        }
    }

    /// Country-level map, keyed by country names.
    pub fn choropleth(title: &str, locations: Vec<String>, z: Vec<u64>) -> Self {
        Self {
            data: vec![Trace::Choropleth {
                locations,
                z,
                locationmode: "country names".to_string(),
            }],
            layout: Layout::titled(title),
        }
    }
}

impl Layout {
    fn titled(text: &str) -> Self {
        Self {
            title: Title {
                text: text.to_string(),
            },
        }
    }
}
