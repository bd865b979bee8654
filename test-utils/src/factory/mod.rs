//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults and take care of foreign keys, so
//! tests only spell out the fields they actually assert on.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let student = factory::user::create_user(db).await?;
//! let (instructor, course) = factory::helpers::create_published_course(db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let instructor = factory::user::UserFactory::new(db)
//!     .role("instructor")
//!     .commission_rate_bps(8000)
//!     .build()
//!     .await?;
//!
//! let course = factory::course::CourseFactory::new(db, instructor.id)
//!     .price_cents(4999)
//!     .status("published")
//!     .build()
//!     .await?;
//! ```

pub mod course;
pub mod difficulty;
pub mod enrollment;
pub mod helpers;
pub mod instructor_application;
pub mod legal_document;
pub mod payout;
pub mod section;
pub mod tag;
pub mod transaction;
pub mod user;

pub use course::create_course;
pub use enrollment::create_enrollment;
pub use section::{create_lecture, create_section};
pub use tag::create_tag;
pub use transaction::create_completed_transaction;
pub use user::{create_admin, create_instructor, create_user};
