use std::sync::Arc;

use shared::{
    domain::{Gender, MaritalStatus},
    protocol::{PASSPORT_PHOTO_BUCKET, REGISTRATIONS_TABLE},
};

use crate::{
    config::BackendSettings,
    draft::{DocumentAsset, PhotoAsset, RegistrationDraft},
    error::SubmissionError,
    fakes::{fixed_keys, jpeg_of_size, FakeBackend},
    submission::SubmissionCoordinator,
};

fn alice_draft() -> RegistrationDraft {
    RegistrationDraft {
        first_name: Some("Alice".into()),
        last_name: Some("Mbala".into()),
        gender: Gender::Female,
        marital_status: MaritalStatus::Married,
        birth_date: Some("2004-06-12".into()),
        birth_place: Some("Gemena".into()),
        phone: Some("+243973380000".into()),
        email: Some("alice.mbala@example.org".into()),
        previous_school: Some("Institut Mokili".into()),
        target_faculty: Some("Médecine".into()),
        target_department: Some("Chirurgie".into()),
        photo: Some(jpeg_of_size("Portrait.Final.JPG", 2 * 1024 * 1024)),
        documents: Vec::new(),
    }
}

#[tokio::test]
async fn uploads_photo_then_inserts_row_referencing_it() {
    let backend = Arc::new(FakeBackend::ok());
    let coordinator = SubmissionCoordinator::new(backend.clone()).with_key_generator(fixed_keys());

    let receipt = coordinator.submit(&alice_draft()).await.expect("submit");
    assert_eq!(receipt.photo_path, "1772442000000-00qglj.JPG");

    let uploads = backend.uploads.lock().await.clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].bucket, PASSPORT_PHOTO_BUCKET);
    assert_eq!(uploads[0].key, "1772442000000-00qglj.JPG");
    assert_eq!(uploads[0].size_bytes, 2 * 1024 * 1024);
    assert_eq!(uploads[0].content_type, "image/jpeg");

    let inserts = backend.inserts.lock().await.clone();
    assert_eq!(inserts.len(), 1);
    let (table, row) = &inserts[0];
    assert_eq!(table, REGISTRATIONS_TABLE);
    assert_eq!(row.first_name.as_deref(), Some("Alice"));
    assert_eq!(row.target_faculty.as_deref(), Some("Médecine"));
    assert_eq!(row.target_department.as_deref(), Some("Chirurgie"));
    assert_eq!(row.gender, Gender::Female);
    assert_eq!(row.marital_status, MaritalStatus::Married);
    assert_eq!(row.passport_photo_url, receipt.photo_path);
}

#[tokio::test]
async fn unconfigured_backend_is_never_called() {
    let backend = Arc::new(FakeBackend::unconfigured());
    let coordinator = SubmissionCoordinator::new(backend.clone());

    let err = coordinator.submit(&alice_draft()).await.expect_err("refused");
    assert_eq!(err, SubmissionError::Configuration);
    assert_eq!(
        err.to_string(),
        "Veuillez configurer vos clés Supabase réelles avant de soumettre."
    );
    assert_eq!(backend.upload_count().await, 0);
    assert_eq!(backend.insert_count().await, 0);
}

#[tokio::test]
async fn upload_failure_skips_insert_and_keeps_backend_detail() {
    let backend = Arc::new(FakeBackend::failing_upload("Bucket not found"));
    let coordinator = SubmissionCoordinator::new(backend.clone());

    let err = coordinator.submit(&alice_draft()).await.expect_err("upload fails");
    assert_eq!(err, SubmissionError::Upload("Bucket not found".into()));
    assert_eq!(
        err.to_string(),
        "Erreur Upload Photo: Bucket not found. Avez-vous créé le bucket 'passport_photos' ?"
    );
    assert_eq!(backend.upload_count().await, 1);
    assert_eq!(backend.insert_count().await, 0);
}

#[tokio::test]
async fn insert_failure_leaves_uploaded_photo_in_place() {
    let backend = Arc::new(FakeBackend::failing_insert("duplicate email"));
    let coordinator = SubmissionCoordinator::new(backend.clone());

    let err = coordinator.submit(&alice_draft()).await.expect_err("insert fails");
    assert_eq!(err.to_string(), "duplicate email");
    assert_eq!(backend.upload_count().await, 1);
    assert_eq!(backend.insert_count().await, 1);
}

#[test]
fn insert_failure_without_detail_uses_connection_message() {
    assert_eq!(
        SubmissionError::Insert(String::new()).to_string(),
        "Erreur de connexion au serveur. Vérifiez votre configuration."
    );
}

#[tokio::test]
async fn resubmission_uploads_again_under_a_new_key() {
    let backend = Arc::new(FakeBackend::failing_insert("timeout"));
    let coordinator = SubmissionCoordinator::new(backend.clone());
    let draft = alice_draft();

    let _ = coordinator.submit(&draft).await;
    let _ = coordinator.submit(&draft).await;

    let uploads = backend.uploads.lock().await.clone();
    assert_eq!(uploads.len(), 2);
    assert_ne!(uploads[0].key, uploads[1].key);
}

#[tokio::test]
async fn draft_without_photo_inserts_empty_photo_path() {
    let backend = Arc::new(FakeBackend::ok());
    let coordinator = SubmissionCoordinator::new(backend.clone());
    let draft = RegistrationDraft {
        photo: None,
        ..alice_draft()
    };

    let receipt = coordinator.submit(&draft).await.expect("submit");
    assert_eq!(receipt.photo_path, "");
    assert_eq!(backend.upload_count().await, 0);
    let inserts = backend.inserts.lock().await.clone();
    assert_eq!(inserts[0].1.passport_photo_url, "");
}

#[tokio::test]
async fn documents_are_not_uploaded_or_referenced() {
    let backend = Arc::new(FakeBackend::ok());
    let coordinator = SubmissionCoordinator::new(backend.clone());
    let draft = RegistrationDraft {
        documents: vec![DocumentAsset {
            file_name: "releve.pdf".into(),
            path: "/tmp/releve.pdf".into(),
            size_bytes: 4096,
        }],
        ..alice_draft()
    };

    coordinator.submit(&draft).await.expect("submit");
    assert_eq!(backend.upload_count().await, 1);
    let row_json = serde_json::to_value(&backend.inserts.lock().await[0].1).expect("json");
    assert!(!row_json.to_string().contains("releve.pdf"));
}

#[tokio::test]
async fn settings_redirect_bucket_and_table() {
    let backend = Arc::new(FakeBackend::ok());
    let settings = BackendSettings {
        photo_bucket: "photos_test".into(),
        registrations_table: "registrations_test".into(),
        ..BackendSettings::default()
    };
    let coordinator = SubmissionCoordinator::from_settings(backend.clone(), &settings);

    coordinator.submit(&alice_draft()).await.expect("submit");
    assert_eq!(backend.uploads.lock().await[0].bucket, "photos_test");
    assert_eq!(backend.inserts.lock().await[0].0, "registrations_test");
}

#[test]
fn photo_without_mime_type_guesses_from_extension() {
    let photo = PhotoAsset::new("scan.png", None, vec![1, 2, 3]);
    assert_eq!(photo.extension(), "png");
    assert_eq!(photo.content_type(), "image/png");

    let bare = PhotoAsset::new("portrait", None, vec![1]);
    assert_eq!(bare.extension(), "portrait");
    assert_eq!(bare.content_type(), "application/octet-stream");
}
