//! # Shop Client
//!
//! Client logic for the boba shop: menu paging, drink customization, the cart
//! and review/order submission.
//!
//! ## Payloads
//!
//! Requests and responses between the client and the server.
//!
//! ### Menu
//! - `GET /menu` (or `/products`): object keyed by category, or a plain array
//! - `GET /menu/{category}`: one category, 400 with a text body if unknown
//! - `GET /customizations`: `{iceLevels, sugarLevels, toppings: [{name, price}]}`
//!
//! ### Submission
//! - `POST /reviews`: `{name, rating, message}`, any 2xx is success
//! - `POST /cart`: the cart as an array of line items, any 2xx is success
//!
//! ### Persisted
//! - `cart`: the cart as JSON, rewritten after every change
//!
//!
//!
//! ## Failure Handling
//!
//! - Menu or catalog load fails: log, carry on with no items or no options
//! - Submit without a selected item, bad cart index: log, nothing changes
//! - POST fails: log, cart and form stay as they were so the user can retry
//! - Stored cart does not parse: start with an empty cart
//!
//! ## Known Limitations
//!
//! - Two shops sharing one storage directory overwrite each other's cart
//! - Whether failed submissions should be surfaced beyond the log is undecided;
//!   callers get the error back and choose
pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod pagination;
pub mod session;
pub mod shop;
pub mod storage;
pub mod submission;
pub mod view;

pub use api::Api;
pub use cart::{CART_KEY, Cart};
pub use config::{ClientConfig, MenuEndpoint};
pub use error::ClientError;
pub use pagination::{Paginator, ScrollGuard, ScrollPosition};
pub use session::CustomizationSession;
pub use shop::Shop;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use submission::{PendingOrder, PendingReview, RequestSlot, RequestState, Submitter};
pub use view::{HeadlessView, Surface, TerminalView, View};
