//! State Management
//!
//! Page context read from the server-rendered document and the reactive
//! chat store.

pub mod chat;
pub mod dom;
pub mod page;

pub use chat::{provide_chat_store, use_chat_store, ChatStore};
pub use page::{provide_page_context, Insight, PageContext, RecentChat};
