#![forbid(unsafe_code)]

//! Freeform pane-tree layout.
//!
//! A [`FreeformPanel`] owns a tree of panes over a host surface. Leaves can be
//! split into proportional children, filled with content, or merged back
//! into their parent. The host is reached only through [`SurfaceAdapter`]
//! (surfaces and geometric relationships) and [`ContentHandle`] (attachable
//! content); [`headless`] provides an in-memory host for tests and tools.
//!
//! ```
//! use freeform_core::geometry::{Axis, Size};
//! use freeform_layout::headless::{HeadlessContent, HeadlessHost};
//! use freeform_layout::{FreeformConfig, FreeformPanel, PaneId};
//!
//! let host = HeadlessHost::new();
//! let root = host.create_root(Size::new(800.0, 600.0));
//! let mut panel: FreeformPanel<_, HeadlessContent> =
//!     FreeformPanel::new(host.clone(), root, FreeformConfig::default());
//!
//! let columns = panel.split_pane(PaneId::ROOT, Axis::Horizontal, &[0.3, 0.7]);
//! assert_eq!(columns.len(), 2);
//! assert!(panel.add_content(columns[1], HeadlessContent::new(&host, Size::new(50.0, 50.0))));
//! assert_eq!(panel.merge_children(PaneId::ROOT), columns);
//! ```

pub mod adapter;
pub mod config;
pub mod content;
pub mod debug;
pub mod error;
pub mod headless;
pub mod pane;
pub mod panel;
pub mod proportions;
pub mod registry;
pub mod visible;

pub use adapter::{Relation, Relationship, RelationshipKind, RelationshipToken, SurfaceAdapter};
pub use config::FreeformConfig;
pub use content::{ContentHandle, ContentKind, PaneContent};
pub use debug::{PaneDebugger, PaneRecord};
pub use error::{ConfigError, PaneModelError, PaneRejection};
pub use pane::{Alignment, AxisPlacement, Pane, PaneId, PaneIdAllocator};
pub use panel::FreeformPanel;
pub use proportions::{DEFAULT_SPLIT_TOLERANCE, SplitPlan, check_proportions};
pub use registry::PaneRegistry;
pub use visible::VisiblePaneIndex;
