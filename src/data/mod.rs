/// Data layer: sniffing, parsing, and the load pipeline.
///
/// Architecture:
/// ```text
///  .csv / .txt / .xlm
///        │
///        ▼
///   ┌───────────┐
///   │ delimiter │  sample ≤10 non-blank lines → comma | tab
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  header + lazy rows → OpenTable
///   └──────────┘
///        │   (user picks columns)
///        ▼
///   ┌───────────┐
///   │ presenter │  selected columns → Chart → TablePresenter
///   └───────────┘
/// ```

pub mod delimiter;
pub mod loader;
pub mod model;
pub mod presenter;
