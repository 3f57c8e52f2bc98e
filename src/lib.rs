//! Provisioning Admin - command-line console for a multi-tenant SaaS provisioning platform
//!
//! This library provides the core functionality for provadmin, including:
//! - Signup funnel consolidation and derived metrics
//! - Data models for tenants, admin users, contact messages and analytics
//! - A typed API client with live HTTP and offline replay transports
//! - Repository layer over the platform API
//! - Settings loaded from `~/.provadmin/rc`
//! - CLI command parsing and execution
//!
//! # Example
//!
//! ```
//! use provadmin::funnel::consolidate_stages;
//! use provadmin::models::FunnelStage;
//!
//! let stages = consolidate_stages(&[
//!     FunnelStage::new("Button Clicks", 100, 100.0),
//!     FunnelStage::new("Started", 80, 80.0),
//!     FunnelStage::new("Plan Selected", 75, 75.0),
//! ]);
//! assert_eq!(stages[1].name, "Plan Selected");
//! assert_eq!(stages[1].count, 80);
//! assert_eq!(stages[1].dropoff, Some(20));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod funnel;
pub mod models;
pub mod repo;
pub mod utils;
