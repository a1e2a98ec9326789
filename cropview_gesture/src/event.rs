// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use smallvec::SmallVec;

/// Active contact points delivered with an event, in stable contact order.
///
/// At most two contacts ever matter here (multi‑touch beyond a pinch is out
/// of scope), so the list is inline‑allocated for that size.
pub type Contacts = SmallVec<[Point; 2]>;

/// Inter‑contact distances at or below this many view pixels are treated as
/// sensor noise: they neither start a pinch nor update one.
pub const PINCH_NOISE_DISTANCE: f64 = 10.0;

/// A pointer‑contact event forwarded by the host surface.
///
/// The host is responsible for delivering events with stable per‑contact
/// identity for the duration of a gesture; the first element of a contact
/// list is always the gesture's primary contact.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// The first contact touched down.
    Down(Point),
    /// A second contact touched down while the first is held.
    ///
    /// Carries both active contacts, primary first.
    SecondaryDown(Contacts),
    /// One or more held contacts moved.
    Move(Contacts),
    /// A contact lifted.
    ///
    /// Lifting either contact ends the active gesture, so no payload is
    /// needed.
    Up,
}

impl PointerEvent {
    /// A first‑contact down at `point`.
    #[must_use]
    pub fn down(point: Point) -> Self {
        Self::Down(point)
    }

    /// A second‑contact down with the primary contact at `first`.
    #[must_use]
    pub fn secondary_down(first: Point, second: Point) -> Self {
        Self::SecondaryDown(SmallVec::from_slice(&[first, second]))
    }

    /// A move event carrying the current position of every held contact.
    #[must_use]
    pub fn moved(contacts: &[Point]) -> Self {
        Self::Move(SmallVec::from_slice(contacts))
    }

    /// A contact-up event.
    #[must_use]
    pub fn up() -> Self {
        Self::Up
    }
}
