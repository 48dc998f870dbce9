//! Bridge declarative chart elements onto an external chart renderer.
//!
//! Chart elements carry string attributes, typed properties and composed
//! child charts. The [`Bridge`] merges them into a [`ParameterSet`] per
//! component invocation and keeps every mounted chart rendered as its
//! state changes.
//!
//! ```
//! use std::rc::Rc;
//! use pfj_charts::{Document, RecordingHost};
//!
//! let host = RecordingHost::new();
//! let doc = Document::new(Rc::new(host.clone()));
//!
//! let donut = doc.create_element("pfj-chart-donut");
//! donut.set_attribute("title", "Pets");
//! doc.append(&donut).unwrap();
//!
//! donut.set_attribute("sub-title", "2024");
//! doc.flush();
//! assert_eq!(host.render_count("pfj-chart-donut"), 2);
//! ```

pub mod adapter;
pub mod coerce;
pub mod document;
pub mod element;
pub mod markup;
pub mod observer;
pub mod params;
pub mod properties;
pub mod recording;
pub mod registry;
pub mod traits;
pub mod variants;

pub use adapter::Bridge;
pub use coerce::{dash_to_camel, parse_attr_value, to_pascal_case};
pub use document::Document;
pub use element::Element;
pub use markup::{parse_markup, MarkupError, MarkupNode};
pub use observer::{ChangeObserver, Delivery, Subscription, TaskQueue};
pub use params::{ParameterSet, DISALLOWED_KEYS};
pub use properties::{
    ChartData, ChartProperties, ChartThemeColor, LabelFormatter, LegendData, LegendOrientation,
    LegendPosition, LegendSymbol, Padding, SubTitlePosition,
};
pub use recording::{RecordingHost, RenderEvent};
pub use registry::ElementRegistry;
pub use traits::{
    Attributes, BridgeError, ChartVariant, ComponentBinding, ComponentRef, RenderHost, RenderNode,
    RenderTarget,
};
