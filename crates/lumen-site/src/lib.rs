//! The portfolio page built on `lumen-motion`.
//!
//! Content records, the loading gate, navigation, per-section reveal
//! tables, the contact form and the `Page` that wires them to the reveal
//! registry and the smooth scroll engine.

pub mod contact;
pub mod content;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod page;
pub mod preloader;
pub mod sections;

pub use contact::{
    ContactForm, ContactMessage, Delivery, MailOpener, MessageTransport, OutgoingMessage,
    ServiceCredentials,
};
pub use content::{
    CertificateEntry, CertificateFilter, Platform, ProjectEntry, ServiceEntry, SiteContent,
    SkillEntry,
};
pub use error::{ContactError, ContentError};
pub use layout::PageLayout;
pub use navigation::{NAV_LINKS, NavLink, NavigationBar};
pub use page::{Page, scroll_config};
pub use preloader::{GateElements, GatePhase, LoadingGate};
pub use sections::{RevealTable, RevealTiming};
