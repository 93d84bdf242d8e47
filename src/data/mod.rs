//! Data layer: layout constants, record types, integer syntax, label parsing
//! and the scan.
//!
//! Architecture:
//! ```text
//!  root/train_labels.csv        root/{train,test}/<id>/<modality>/
//!        │                              │
//!        ▼                              ▼
//!   ┌──────────┐                  ┌──────────┐
//!   │  labels   │  id → label ──▶ │  loader   │  sorted scan → Vec<Subject>
//!   └──────────┘                  └──────────┘
//!                                       │
//!                                       ▼
//!                                 ┌──────────┐
//!                                 │ dataset   │  RsnaMiccai, DatasetSummary
//!                                 └──────────┘
//! ```

pub mod dataset;
pub mod integer;
pub mod labels;
pub mod loader;
pub mod model;
