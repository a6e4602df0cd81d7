// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod magic_link;
pub mod mailer;

pub use magic_link::MagicLinkService;
pub use mailer::MailerService;
