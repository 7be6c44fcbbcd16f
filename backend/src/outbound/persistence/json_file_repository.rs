//! JSON file adapter for the patient repository port.

use std::io;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_write::write_atomic;
use super::models::{PatientDocument, to_document};
use crate::domain::PatientCollection;
use crate::domain::ports::{PatientRepository, PatientRepositoryError};

/// Patient repository backed by a single JSON document.
///
/// The document lives in an already-existing directory; the file itself is
/// created on first save. A missing file loads as an empty collection.
#[derive(Debug)]
pub struct JsonFilePatientRepository {
    dir: Dir,
    file_name: Utf8PathBuf,
}

impl JsonFilePatientRepository {
    /// Open the store at `path`.
    ///
    /// The parent directory is opened immediately so later saves can rename
    /// within it. A bare file name resolves against the working directory.
    pub fn open(path: &Utf8Path) -> Result<Self, PatientRepositoryError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| PatientRepositoryError::io(format!("{path}: store path must name a file")))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| PatientRepositoryError::io(format!("{parent}: {err}")))?;

        Ok(Self {
            dir,
            file_name: Utf8PathBuf::from(file_name),
        })
    }

    fn read_document(&self) -> Result<Option<String>, PatientRepositoryError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PatientRepositoryError::io(format!(
                "{}: {err}",
                self.file_name
            ))),
        }
    }
}

#[async_trait]
impl PatientRepository for JsonFilePatientRepository {
    async fn load_all(&self) -> Result<PatientCollection, PatientRepositoryError> {
        let Some(contents) = self.read_document()? else {
            debug!(file = %self.file_name, "patient store missing; starting empty");
            return Ok(PatientCollection::new());
        };

        let document: PatientDocument = serde_json::from_str(&contents)
            .map_err(|err| PatientRepositoryError::serialization(err.to_string()))?;
        document
            .into_iter()
            .map(|(id, row)| {
                row.into_patient(id.clone())
                    .map(|patient| (patient.id().clone(), patient))
                    .map_err(|err| {
                        PatientRepositoryError::serialization(format!("record {id}: {err}"))
                    })
            })
            .collect()
    }

    async fn save_all(&self, patients: &PatientCollection) -> Result<(), PatientRepositoryError> {
        let contents = serde_json::to_string_pretty(&to_document(patients))
            .map_err(|err| PatientRepositoryError::serialization(err.to_string()))?;
        write_atomic(&self.dir, &self.file_name, &contents)?;
        debug!(file = %self.file_name, records = patients.len(), "patient store saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientDraft, Verdict};
    use rstest::{fixture, rstest};

    struct Store {
        _tmp: tempfile::TempDir,
        path: Utf8PathBuf,
    }

    #[fixture]
    fn store() -> Store {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 temp dir");
        Store {
            path: dir.join("patient.json"),
            _tmp: tmp,
        }
    }

    fn collection() -> PatientCollection {
        let patient = PatientDraft {
            id: "P001".to_owned(),
            name: "A".to_owned(),
            city: "X".to_owned(),
            age: 30,
            gender: "male".to_owned(),
            height: 1.75,
            weight: 70.0,
        }
        .validate()
        .expect("valid draft");
        PatientCollection::from([(patient.id().clone(), patient)])
    }

    #[rstest]
    #[tokio::test]
    async fn missing_file_loads_empty(store: Store) {
        let repo = JsonFilePatientRepository::open(&store.path).expect("open store");
        let patients = repo.load_all().await.expect("load succeeds");
        assert!(patients.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn saved_collection_loads_back(store: Store) {
        let repo = JsonFilePatientRepository::open(&store.path).expect("open store");
        repo.save_all(&collection()).await.expect("save succeeds");

        let loaded = repo.load_all().await.expect("load succeeds");
        assert_eq!(loaded, collection());
    }

    #[rstest]
    #[tokio::test]
    async fn document_is_keyed_by_id_without_inline_id(store: Store) {
        let repo = JsonFilePatientRepository::open(&store.path).expect("open store");
        repo.save_all(&collection()).await.expect("save succeeds");

        let raw = std::fs::read_to_string(&store.path).expect("read document");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        let record = value.get("P001").expect("keyed by id");
        assert!(record.get("id").is_none());
        assert_eq!(record.get("verdict").and_then(|v| v.as_str()), Some("Normal"));
    }

    #[rstest]
    #[tokio::test]
    async fn hand_edited_metrics_are_recomputed(store: Store) {
        std::fs::write(
            &store.path,
            r#"{"P001":{"name":"A","city":"X","age":30,"gender":"male","height":2.0,"weight":120.0,"bmi":1.0,"verdict":"Underweight"}}"#,
        )
        .expect("seed document");
        let repo = JsonFilePatientRepository::open(&store.path).expect("open store");

        let loaded = repo.load_all().await.expect("load succeeds");
        let patient = loaded.get("P001").expect("record present");
        assert_eq!(patient.metrics().bmi(), 30.0);
        assert_eq!(patient.metrics().verdict(), Verdict::Obese);
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"P001":{"name":"A","city":"X","age":300,"gender":"male","height":1.7,"weight":60.0}}"#)]
    #[tokio::test]
    async fn unreadable_documents_are_serialization_errors(store: Store, #[case] contents: &str) {
        std::fs::write(&store.path, contents).expect("seed document");
        let repo = JsonFilePatientRepository::open(&store.path).expect("open store");

        let err = repo.load_all().await.expect_err("load fails");
        assert!(matches!(err, PatientRepositoryError::Serialization { .. }));
    }

    #[rstest]
    fn missing_directory_fails_to_open() {
        let err = JsonFilePatientRepository::open(Utf8Path::new("/nonexistent-dir/patient.json"))
            .expect_err("open fails");
        assert!(matches!(err, PatientRepositoryError::Io { .. }));
    }
}
