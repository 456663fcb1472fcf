//! # Michi - Request Path Resolution Engine
//!
//! **Michi** turns a canvas of typed nodes (base URLs, path resources and HTTP methods)
//! connected by directed edges into ready-to-send HTTP requests. Given any graph the user
//! has drawn and a selected terminal node, it walks backwards to a base URL, fills
//! `{name}` placeholders from a variable table, composes a clean URL and assembles the
//! request a method node describes.
//!
//! ## Core Workflow
//!
//! 1.  **Build or Load a Graph**: Construct a `Graph` directly, convert the editor's
//!     canvas JSON with `CanvasDocument`, or import an OpenAPI/Swagger document.
//! 2.  **Drive a Session**: Apply `Command`s to a `Session`. After every command it
//!     recomputes the active path, its highlight set and the computed URL.
//! 3.  **Send**: Hand the session a `Transport`. The assembled request is sent and the
//!     outcome, including network failures, is recorded as data.
//!
//! ## Quick Start
//!
//! ```rust
//! use michi::prelude::*;
//!
//! let mut session = Session::builder().build();
//! let post = session.new_method_node("login", HttpMethod::Post);
//! for command in [
//!     Command::AddNode(Node::base_url("api", "http://localhost:3000")),
//!     Command::AddNode(Node::resource("auth", "auth")),
//!     Command::AddNode(Node::resource("user", "{userId}")),
//!     Command::AddNode(post),
//!     Command::Connect(Edge::between("api", "auth")),
//!     Command::Connect(Edge::between("auth", "user")),
//!     Command::Connect(Edge::between("user", "login")),
//!     Command::SetVariable { name: "userId".into(), value: "7".into() },
//!     Command::SetActivePath(Some(NodeId::from("login"))),
//! ] {
//!     session.apply(command)?;
//! }
//!
//! assert_eq!(session.computed_url(), Some("http://localhost:3000/auth/7"));
//! assert!(session.active_path().contains("auth"));
//! # Ok::<(), michi::error::GraphError>(())
//! ```

pub mod canvas;
pub mod error;
pub mod graph;
pub mod import;
pub mod persistence;
pub mod prelude;
pub mod projection;
pub mod request;
pub mod resolver;
pub mod session;
pub mod trace;
