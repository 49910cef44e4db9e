//! # kgassist Web
//!
//! A single-page browser front-end: pick a document index, pick a search
//! method, ask a question, or look at the document's knowledge graph.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run -p kgassist-web -- --root project --port 8501
//! # Open http://127.0.0.1:8501 in your browser
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/documents` | Available document indexes and search methods |
//! | POST | `/api/query` | Forward a question to the query tool |
//! | GET | `/api/graph/:document` | The document's rendered knowledge graph image |

pub mod routes;
pub mod state;

pub use state::AppState;
