// Copyright 2025 the Cropview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cropview_gesture --heading-base-level=0

//! Cropview Gesture: the pointer state machine driving pan, zoom, and resize.
//!
//! This crate consumes raw pointer‑contact events and reconciles the three
//! ambiguous interactions of a crop view against a single image transform
//! and crop mask:
//!
//! - **Drag**: one contact on the mapped image pans it.
//! - **Pinch‑zoom**: two contacts scale it about their midpoint.
//! - **Mask resize**: one contact near a mask edge or corner moves that edge
//!   (or both edges of a corner) instead of the image.
//!
//! Classification happens at contact‑down time and is carried in
//! [`GestureState`] as a tagged variant with per‑gesture payload: the saved
//! transform snapshot, the down point, the pinch pivot and start distance,
//! or the active [`ResizeEdges`](cropview_mask::ResizeEdges) set. Resize
//! takes priority over drag and zoom while active; a second contact clears
//! an active resize in favor of pinch classification.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use cropview_gesture::{Damage, GestureController, PointerEvent};
//!
//! let mut controller = GestureController::new();
//! controller.set_image_size(Some(Size::new(800.0, 600.0)));
//! controller.set_layout(Size::new(600.0, 800.0));
//!
//! // One contact lands on the image and drags it 10 px right.
//! controller.on_event(&PointerEvent::down(Point::new(300.0, 400.0)));
//! let damage = controller.on_event(&PointerEvent::moved(&[Point::new(310.0, 400.0)]));
//! assert_eq!(damage, Damage::Transform);
//!
//! // Lifting any contact ends the gesture.
//! controller.on_event(&PointerEvent::up());
//! ```
//!
//! ## Scale clamping
//!
//! After every event processed while zooming, the effective scale is checked
//! against [`ScaleLimits`]. Below the minimum, the transform is reset to
//! exactly the minimum uniform scale (discarding translation); above the
//! maximum, the whole update is rejected by reverting to the gesture‑start
//! snapshot. The asymmetry is deliberate and part of the observable
//! contract.
//!
//! This crate performs no rendering and owns no pixels; each dispatch
//! reports [`Damage`] so an embedding surface can request a repaint.
//!
//! This crate is `no_std`.

#![no_std]

mod controller;
mod event;
mod state;

pub use controller::{Damage, GestureController, MAX_SCALE, MIN_SCALE, ScaleLimits};
pub use event::{Contacts, PINCH_NOISE_DISTANCE, PointerEvent};
pub use state::GestureState;
