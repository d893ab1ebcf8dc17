pub mod time_of_day;
pub mod working_hours;
pub mod slots;
pub mod validator;
pub mod lifecycle;
pub mod reminder;
pub mod clock;
pub mod clinic;
pub mod notification;
pub mod store;
pub mod booking;

pub use booking::AppointmentBookingService;
pub use clinic::{ClinicProfileReader, InMemoryClinicDirectory};
pub use clock::{Clock, FixedClock, SystemClock};
pub use lifecycle::AppointmentLifecycleService;
pub use notification::{LoggingNotificationTrigger, NotificationTrigger};
pub use reminder::{can_offer_reminder, is_reminder_eligible};
pub use slots::generate_slots;
pub use store::{AppointmentStore, InMemoryAppointmentStore};
pub use time_of_day::TimeOfDay;
pub use validator::{is_bookable, validate_candidate};
pub use working_hours::{parse_day_rule, DaySchedule};
