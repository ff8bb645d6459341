//! # TUI Components
//!
//! All UI components for the search screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `CountryCard`: one country's facts with a `Location` link
//! - `PlaceholderCard`: shimmering skeleton shown while loading
//! - `StatusBar`: status or error text plus key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `SearchBar`: country name input and `Search` button
//! - `ResultsList`: scrollable column of cards, state in `ResultsListState`
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props", never by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! StatusBar::new(&app.status_message, app.error.as_deref(), focused).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! status_bar.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── search_bar.rs        (query input + button)
//! ├── results_list.rs      (scrollable card column, hit testing)
//! ├── country_card.rs      (single country card)
//! ├── placeholder_card.rs  (loading skeleton)
//! └── status_bar.rs        (bottom status line)
//! ```

pub mod country_card;
pub mod placeholder_card;
pub mod results_list;
pub mod search_bar;
pub mod status_bar;

pub use country_card::CountryCard;
pub use placeholder_card::PlaceholderCard;
pub use results_list::{CardHit, ResultsList, ResultsListState};
pub use search_bar::{SearchBar, SearchEvent};
pub use status_bar::StatusBar;
