// SPDX-License-Identifier: MPL-2.0
//! `homeledger-i18n` is the localization runtime of the HomeLedger family
//! bookkeeping app.
//!
//! It resolves the startup locale from the persisted user preference, the
//! device system language, and a static default, in that order; switches
//! locale at runtime with synchronous notification of UI consumers; and
//! serves translations by dotted key path with fallback-locale semantics.
//! All failure paths degrade silently to a defined default.

pub mod catalog;
pub mod cell;
pub mod error;
pub mod localizer;
pub mod resolver;
pub mod storage;
pub mod system;
