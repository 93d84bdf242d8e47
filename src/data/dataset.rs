use std::collections::BTreeMap;
use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::loader::{resolve_root, scan_split};
use super::model::{Modality, Subject, MODALITIES};

// ---------------------------------------------------------------------------
// RsnaMiccai – the indexed dataset
// ---------------------------------------------------------------------------

/// RSNA-MICCAI Brain Tumor Radiogenomic Classification challenge dataset.
///
/// The challenge files must already be downloaded and extracted under
/// `root_dir`. Building the dataset only indexes the tree; images are never
/// opened. Subjects are ordered by directory name.
#[derive(Debug, Clone)]
pub struct RsnaMiccai {
    root_dir: PathBuf,
    train: bool,
    subjects: Vec<Subject>,
}

impl RsnaMiccai {
    /// Index the `train` (labelled) or `test` split under `root_dir`.
    pub fn new<P: AsRef<Path>>(root_dir: P, train: bool) -> Result<Self> {
        let root_dir = resolve_root(root_dir.as_ref())?;
        let subjects = scan_split(&root_dir, train)?;
        Ok(RsnaMiccai {
            root_dir,
            train,
            subjects,
        })
    }

    pub fn train<P: AsRef<Path>>(root_dir: P) -> Result<Self> {
        Self::new(root_dir, true)
    }

    pub fn test<P: AsRef<Path>>(root_dir: P) -> Result<Self> {
        Self::new(root_dir, false)
    }

    /// Canonical absolute root the dataset was read from.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn is_train(&self) -> bool {
        self.train
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Subject> {
        self.subjects.get(index)
    }

    /// Subject by identifier (exact directory name).
    pub fn find(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.subjects.iter()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn into_subjects(self) -> Vec<Subject> {
        self.subjects
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_subjects(&self.subjects)
    }
}

impl Index<usize> for RsnaMiccai {
    type Output = Subject;

    fn index(&self, index: usize) -> &Subject {
        &self.subjects[index]
    }
}

impl<'a> IntoIterator for &'a RsnaMiccai {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.iter()
    }
}

// ---------------------------------------------------------------------------
// DatasetSummary – counts for a quick look at a split
// ---------------------------------------------------------------------------

/// How many subjects reference each modality as a lone file vs a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ModalityCounts {
    pub single_file: usize,
    pub series: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DatasetSummary {
    pub subjects: usize,
    /// label → number of subjects. Empty for the test split.
    pub labels: BTreeMap<i64, usize>,
    pub modalities: BTreeMap<&'static str, ModalityCounts>,
}

impl DatasetSummary {
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        let mut labels = BTreeMap::new();
        let mut modalities: BTreeMap<&'static str, ModalityCounts> = MODALITIES
            .iter()
            .map(|m| (m.as_str(), ModalityCounts::default()))
            .collect();

        for subject in subjects {
            if let Some(label) = subject.label() {
                *labels.entry(label).or_insert(0) += 1;
            }
            for (modality, image) in subject.images() {
                let counts = modalities.entry(modality.as_str()).or_default();
                if image.is_series() {
                    counts.series += 1;
                } else {
                    counts.single_file += 1;
                }
            }
        }

        DatasetSummary {
            subjects: subjects.len(),
            labels,
            modalities,
        }
    }

    pub fn modality(&self, modality: Modality) -> ModalityCounts {
        self.modalities
            .get(modality.as_str())
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ImageRef;

    fn subject(id: &str, label: Option<i64>, series: bool) -> Subject {
        let img = |m: Modality| {
            let p = PathBuf::from(format!("/r/{id}/{m}"));
            if series && m == Modality::T1w {
                ImageRef::Series(p)
            } else {
                ImageRef::SingleFile(p.join("x.dcm"))
            }
        };
        Subject::new(id, label, MODALITIES.map(img))
    }

    #[test]
    fn summary_counts() {
        let subjects = vec![
            subject("00001", Some(1), true),
            subject("00002", Some(0), false),
            subject("00003", Some(1), true),
        ];
        let summary = DatasetSummary::from_subjects(&subjects);
        assert_eq!(summary.subjects, 3);
        assert_eq!(summary.labels.get(&1), Some(&2));
        assert_eq!(summary.labels.get(&0), Some(&1));
        assert_eq!(
            summary.modality(Modality::T1w),
            ModalityCounts {
                single_file: 1,
                series: 2
            }
        );
        assert_eq!(summary.modality(Modality::Flair).single_file, 3);
    }

    #[test]
    fn summary_serializes_with_string_label_keys() {
        let subjects = vec![subject("00001", Some(1), true), subject("00002", Some(0), false)];
        let json = serde_json::to_value(DatasetSummary::from_subjects(&subjects)).unwrap();
        assert_eq!(json["subjects"], 2);
        assert_eq!(json["labels"]["0"], 1);
        assert_eq!(json["labels"]["1"], 1);
        assert_eq!(json["modalities"]["T1w"]["series"], 1);
        assert_eq!(json["modalities"]["FLAIR"]["single_file"], 2);
    }

    #[test]
    fn empty_summary_lists_every_modality() {
        let summary = DatasetSummary::from_subjects(&[]);
        assert_eq!(summary.subjects, 0);
        assert!(summary.labels.is_empty());
        assert_eq!(summary.modalities.len(), 4);
    }
}
