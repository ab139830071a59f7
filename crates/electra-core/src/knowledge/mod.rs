//! Club knowledge base: roles, teams, and events.
//!
//! Loaded once at process start and shared read-only (`Arc<KnowledgeBase>`); there is
//! no writer after load.
//!
//! | Field             | Shape                                         |
//! |-------------------|-----------------------------------------------|
//! | `about`           | free text                                     |
//! | `members`         | fixed role key -> person name (may be blank)  |
//! | `categories`      | ordered wing/team names                       |
//! | `events.past`     | ordered `{name, date, description}`           |
//! | `events.upcoming` | ordered `{name, date}`, first one is "next"   |

mod store;

pub use store::{Events, KnowledgeBase, Members, PastEvent, Role, Secretaries, UpcomingEvent};
