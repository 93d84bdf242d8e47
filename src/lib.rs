//! Subject indexer for the RSNA-MICCAI Brain Tumor Radiogenomic
//! Classification challenge.
//!
//! Walks a downloaded copy of the challenge data and produces one
//! [`Subject`] per case, each pointing at the image files of the four MRI
//! modalities (T1w, T1wCE, T2w, FLAIR) and, for the training split, carrying
//! the MGMT promoter methylation label from `train_labels.csv`.
//!
//! ```no_run
//! use rsna_miccai::{Modality, RsnaMiccai};
//!
//! let dataset = RsnaMiccai::train("~/kaggle/rsna-miccai")?;
//! for subject in &dataset {
//!     println!("{} {:?} {:?}", subject.id(), subject.label(), subject.image(Modality::Flair));
//! }
//! # Ok::<(), rsna_miccai::DatasetError>(())
//! ```
//!
//! If you use the dataset, cite [`CITATION`].

pub mod data;
pub mod error;

pub use data::dataset::{DatasetSummary, ModalityCounts, RsnaMiccai};
pub use data::labels::LabelTable;
pub use data::loader::load_subjects;
pub use data::model::{
    FieldValue, ImageRef, Modality, Subject, CITATION, ID_KEY, LABELS_FILE, LABEL_KEY, MODALITIES,
    TEST_DIR, TRAIN_DIR,
};
pub use error::{DatasetError, Result};
