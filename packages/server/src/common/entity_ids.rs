//! Typed ID definitions for all domain entities.
//!
//! Type aliases over [`Id`] give compile-time safety for ID usage across
//! the application: a `NeedId` cannot be passed where a `ResponseId` is
//! expected.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for users. Users live in the external identity service;
/// this side only ever stores their IDs.
pub struct User;

/// Marker type for Need entities (published requests for help).
pub struct Need;

/// Marker type for Response entities (offers to fulfill a need).
pub struct Response;

/// Marker type for AcceptedMatch ledger entries.
pub struct AcceptedMatch;

/// Marker type for regions. Regions live in the external taxonomy
/// directory; stored here as opaque identifiers.
pub struct Region;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for users.
pub type UserId = Id<User>;

/// Typed ID for Need entities.
pub type NeedId = Id<Need>;

/// Typed ID for Response entities.
pub type ResponseId = Id<Response>;

/// Typed ID for AcceptedMatch ledger entries.
pub type MatchId = Id<AcceptedMatch>;

/// Typed ID for regions.
pub type RegionId = Id<Region>;
