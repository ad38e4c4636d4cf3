//! Push notification handling on the client host: building the display
//! model, asking the host to show it and routing clicks back into the
//! application's windows.

#[cfg(all(feature = "browser", target_arch = "wasm32"))]
pub mod browser;
pub mod host;
pub mod memory;
pub mod normalize;
pub mod origin;
pub mod payload;
pub mod presenter;
pub mod router;
pub mod windows;

pub use host::ServiceWorker;
pub use memory::{HostCall, MemoryHost};
pub use normalize::{default_model, normalize};
pub use origin::{OriginPolicy, resolve_url};
pub use payload::{DisplayModel, NotificationData, NotificationPayload, PushData};
pub use presenter::{NotificationPresenter, NotificationRequest, present};
pub use router::{
    Action, ClickAction, InteractionEvent, Intent, NavigationPlan, NotificationState,
    ShownNotification, Transition, plan_navigation, route,
};
pub use windows::{WindowBroker, WindowId, WindowInfo};

/// Bound shared by the host capability traits. Browser handles are not
/// thread safe, so wasm hosts only need to live on one thread.
#[cfg(not(target_arch = "wasm32"))]
pub trait HostBound: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> HostBound for T {}

#[cfg(target_arch = "wasm32")]
pub trait HostBound {}
#[cfg(target_arch = "wasm32")]
impl<T> HostBound for T {}
