pub mod category;
pub mod event;
pub mod purchase;
pub mod ticket_type;
pub mod user;

pub use category::{Category, NewCategory};
pub use event::{Event, EventWithDetails, NewEvent, SeatingMap};
pub use purchase::{
    NewPurchase, NewPurchaseItem, Purchase, PurchaseItem, PurchaseItemWithTicketType,
    PurchaseWithDetails, PURCHASE_STATUS_COMPLETED,
};
pub use ticket_type::{NewTicketType, TicketType};
pub use user::{NewUser, User};
