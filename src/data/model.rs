use std::fmt;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// Fixed layout constants
// ---------------------------------------------------------------------------

/// Column of `train_labels.csv` holding the subject identifier, and the record
/// field the identifier is stored under.
pub const ID_KEY: &str = "BraTS21ID";

/// Column of `train_labels.csv` holding the MGMT promoter methylation label,
/// and the record field the label is stored under.
pub const LABEL_KEY: &str = "MGMT_value";

/// Label table file name, directly under the dataset root.
pub const LABELS_FILE: &str = "train_labels.csv";

pub const TRAIN_DIR: &str = "train";
pub const TEST_DIR: &str = "test";

/// Reference to cite when the dataset is used.
pub const CITATION: &str = "U.Baid, et al., \"The RSNA-ASNR-MICCAI BraTS 2021 Benchmark on \
Brain Tumor Segmentation and Radiogenomic Classification\", arXiv:2107.02314, 2021.";

// ---------------------------------------------------------------------------
// Modality
// ---------------------------------------------------------------------------

/// MRI acquisition protocol. Each subject folder holds one subfolder per
/// modality, named exactly as [`Modality::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modality {
    T1w,
    T1wCE,
    T2w,
    Flair,
}

/// Every modality, in the order records list them.
pub const MODALITIES: [Modality; 4] = [
    Modality::T1w,
    Modality::T1wCE,
    Modality::T2w,
    Modality::Flair,
];

impl Modality {
    /// Directory name and record key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Modality::T1w => "T1w",
            Modality::T1wCE => "T1wCE",
            Modality::T2w => "T2w",
            Modality::Flair => "FLAIR",
        }
    }

    /// Position within [`MODALITIES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_key(key: &str) -> Option<Modality> {
        MODALITIES.into_iter().find(|m| m.as_str() == key)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ImageRef – where the pixels of one modality live
// ---------------------------------------------------------------------------

/// Handle to the image data of one modality.
///
/// Decoding is left to the consumer: a `SingleFile` is one volume file, a
/// `Series` is a directory (typically one DICOM file per slice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ImageRef {
    SingleFile(PathBuf),
    Series(PathBuf),
}

impl ImageRef {
    pub fn path(&self) -> &Path {
        match self {
            ImageRef::SingleFile(p) | ImageRef::Series(p) => p,
        }
    }

    pub fn is_series(&self) -> bool {
        matches!(self, ImageRef::Series(_))
    }
}

// ---------------------------------------------------------------------------
// FieldValue – one entry of a subject record
// ---------------------------------------------------------------------------

/// Borrowed view of a single record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Image(&'a ImageRef),
}

impl<'a> FieldValue<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&'a ImageRef> {
        match self {
            FieldValue::Image(img) => Some(img),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Image(img) => write!(f, "{}", img.path().display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Subject – one case of the challenge
// ---------------------------------------------------------------------------

/// A subject record: identifier, optional label, one image per modality.
///
/// Records are built once by the loader and never mutated. Field access by
/// name goes through [`Subject::get`], using [`ID_KEY`], [`LABEL_KEY`] and the
/// modality names as keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    id: String,
    label: Option<i64>,
    images: [ImageRef; 4],
}

impl Subject {
    /// `images` is indexed like [`MODALITIES`].
    pub fn new(id: impl Into<String>, label: Option<i64>, images: [ImageRef; 4]) -> Self {
        Subject {
            id: id.into(),
            label,
            images,
        }
    }

    /// Raw directory name of the subject (zero padding preserved).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Label from `train_labels.csv`; `None` for test-split subjects.
    pub fn label(&self) -> Option<i64> {
        self.label
    }

    pub fn image(&self, modality: Modality) -> &ImageRef {
        &self.images[modality.index()]
    }

    pub fn images(&self) -> impl Iterator<Item = (Modality, &ImageRef)> {
        MODALITIES.into_iter().zip(self.images.iter())
    }

    /// Look up a field by record key.
    pub fn get(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            ID_KEY => Some(FieldValue::Text(&self.id)),
            LABEL_KEY => self.label.map(FieldValue::Integer),
            other => Modality::from_key(other).map(|m| FieldValue::Image(self.image(m))),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All present fields: identifier, label (if any), then the modalities.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, FieldValue<'_>)> {
        let head = std::iter::once((ID_KEY, FieldValue::Text(&self.id)));
        let label = self.label.map(|l| (LABEL_KEY, FieldValue::Integer(l)));
        let images = self
            .images()
            .map(|(m, img)| (m.as_str(), FieldValue::Image(img)));
        head.chain(label).chain(images)
    }
}

impl Serialize for Subject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.label.is_some() { 6 } else { 5 };
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in self.fields() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}
