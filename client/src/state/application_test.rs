use super::*;

fn meta(name: &str, size: u64) -> FileMeta {
    FileMeta { name: name.to_owned(), size, mime: "application/pdf".to_owned() }
}

fn filled_profile() -> Profile {
    Profile {
        full_name: "Asha Patil".to_owned(),
        email_address: "asha@example.in".to_owned(),
        mobile_number: "919876543210".to_owned(),
        aadhaar_number: "123456789012".to_owned(),
        state: "Maharashtra".to_owned(),
        district: "Pune".to_owned(),
        taluka: "Haveli".to_owned(),
        village: "Wagholi".to_owned(),
        address: "Near temple".to_owned(),
        land_size: "2.5".to_owned(),
        unit: "acres".to_owned(),
        soil_type: "Black".to_owned(),
        ownership_type: "owned".to_owned(),
        bank_account_number: "001234567890".to_owned(),
        ifsc_code: "SBIN0001234".to_owned(),
        bank_name: "SBI".to_owned(),
        ..Profile::default()
    }
}

fn prefilled() -> ApplicationWizard {
    let mut wizard = ApplicationWizard::new(7);
    wizard.prefill(&filled_profile());
    wizard
}

fn with_document(wizard: &mut ApplicationWizard, doc_type: DocumentType) -> u64 {
    wizard.open_add();
    wizard.set_draft_type(doc_type.value());
    wizard.set_draft_number("AB-1");
    wizard.pick_draft_file(meta("doc.pdf", 1_000));
    match wizard.save_draft() {
        Some(DraftSaved::Added(id)) => id,
        other => panic!("expected add, got {other:?}"),
    }
}

// =============================================================
// Heading and steps
// =============================================================

#[test]
fn heading_uses_subsidy_title_when_known() {
    let mut wizard = ApplicationWizard::new(1);
    assert_eq!(wizard.heading(), "Subsidy Application Form");
    wizard.subsidy_title = Some("Drip Irrigation".to_owned());
    assert_eq!(wizard.heading(), "Drip Irrigation Application Form");
}

#[test]
fn progress_counts_four_steps() {
    let mut wizard = prefilled();
    assert_eq!(wizard.progress_label(), "Step 1 of 4");
    assert!(wizard.next());
    assert!(wizard.next());
    assert!(wizard.next());
    assert_eq!(wizard.progress_label(), "Step 4 of 4");
    assert!(wizard.is_last_step());
    assert!(wizard.next());
    assert_eq!(wizard.step, Step::Documents);
}

#[test]
fn back_stops_at_first_step() {
    let mut wizard = prefilled();
    assert!(!wizard.can_go_back());
    wizard.back();
    assert_eq!(wizard.step, Step::Personal);
    wizard.next();
    assert!(wizard.can_go_back());
    wizard.back();
    assert_eq!(wizard.step, Step::Personal);
}

#[test]
fn empty_personal_step_blocks_next_with_inline_errors() {
    let mut wizard = ApplicationWizard::new(1);
    assert!(!wizard.next());
    assert_eq!(wizard.step, Step::Personal);
    assert_eq!(wizard.error(Field::FullName), Some("Full name is required"));
    assert_eq!(wizard.error(Field::Mobile), Some("Enter a valid 10-digit mobile number"));
    assert_eq!(wizard.error(Field::Email), Some("Enter a valid email"));
    assert_eq!(wizard.error(Field::Aadhaar), Some("Aadhaar must be 12 digits"));
    assert_eq!(wizard.error(Field::Address), Some("Address required"));
    assert_eq!(wizard.error(Field::LandArea), None, "later steps are not checked yet");
}

#[test]
fn land_and_bank_steps_report_their_own_messages() {
    let mut wizard = ApplicationWizard::new(1);
    assert!(!wizard.validate_step(Step::Land));
    assert_eq!(wizard.error(Field::Unit), Some("Select unit"));
    assert_eq!(wizard.error(Field::Ownership), Some("Select ownership type"));
    assert!(!wizard.validate_step(Step::Bank));
    assert_eq!(wizard.error(Field::Ifsc), Some("Enter IFSC"));
    assert_eq!(wizard.error(Field::AccountNumber), Some("Enter account number"));
}

// =============================================================
// Field rules
// =============================================================

#[test]
fn mobile_must_start_with_six_to_nine() {
    let mut wizard = ApplicationWizard::new(1);
    wizard.set(Field::Mobile, "5876543210");
    wizard.blur(Field::Mobile);
    assert!(wizard.error(Field::Mobile).is_some());
    wizard.set(Field::Mobile, "6876543210");
    assert_eq!(wizard.error(Field::Mobile), None, "re-checked live once an error shows");
}

#[test]
fn numeric_fields_are_filtered_while_typing() {
    let mut wizard = ApplicationWizard::new(1);
    wizard.set(Field::Mobile, "98-765 43210 99");
    assert_eq!(wizard.value(Field::Mobile), "9876543210");
    wizard.set(Field::LandArea, "2.5.1 acres");
    assert_eq!(wizard.value(Field::LandArea), "2.51");
    wizard.set(Field::Ifsc, " sbin0001234 ");
    assert_eq!(wizard.value(Field::Ifsc), "SBIN0001234");
}

#[test]
fn ifsc_present_but_wrong_length_fails() {
    let mut wizard = ApplicationWizard::new(1);
    wizard.set(Field::Ifsc, "SBIN01");
    wizard.blur(Field::Ifsc);
    assert_eq!(wizard.error(Field::Ifsc), Some(validate::INVALID_IFSC));
}

#[test]
fn prefill_normalizes_mobile_and_keeps_typed_values() {
    let mut wizard = ApplicationWizard::new(1);
    wizard.set(Field::FullName, "Typed Name");
    wizard.prefill(&filled_profile());
    assert_eq!(wizard.value(Field::FullName), "Typed Name");
    assert_eq!(wizard.value(Field::Mobile), "9876543210");
    assert_eq!(wizard.value(Field::Unit), "acres");
}

// =============================================================
// Documents
// =============================================================

#[test]
fn staged_types_leave_the_available_list() {
    let mut wizard = prefilled();
    assert_eq!(wizard.available_types().len(), 3);
    with_document(&mut wizard, DocumentType::LandRecords);
    assert_eq!(wizard.available_types(), vec![DocumentType::AadhaarCard, DocumentType::BankPassbook]);
    with_document(&mut wizard, DocumentType::AadhaarCard);
    with_document(&mut wizard, DocumentType::BankPassbook);
    assert!(!wizard.can_add_document());
    wizard.open_add();
    assert!(wizard.draft.is_none());
}

#[test]
fn add_requires_type_number_and_file() {
    let mut wizard = prefilled();
    wizard.open_add();
    assert_eq!(wizard.save_draft(), None);
    let draft = wizard.draft.as_ref().unwrap();
    assert_eq!(draft.type_error, Some(DOCUMENT_TYPE_REQUIRED));
    assert_eq!(draft.number_error, Some(DOCUMENT_NUMBER_REQUIRED));
    assert_eq!(draft.file_error, Some(DOCUMENT_FILE_REQUIRED));
}

#[test]
fn document_number_over_forty_chars_is_too_long() {
    assert_eq!(validate_document_number(&"9".repeat(40)), Ok(()));
    assert_eq!(validate_document_number(&"9".repeat(41)), Err(DOCUMENT_NUMBER_TOO_LONG));
    assert_eq!(validate_document_number("   "), Err(DOCUMENT_NUMBER_REQUIRED));
}

#[test]
fn oversize_file_is_flagged_on_pick() {
    let mut wizard = prefilled();
    wizard.open_add();
    wizard.pick_draft_file(meta("big.pdf", MAX_UPLOAD_BYTES + 1));
    assert_eq!(wizard.draft.as_ref().unwrap().file_error, Some(DOCUMENT_FILE_TOO_LARGE));
}

#[test]
fn edit_changes_number_and_keeps_file_unless_replaced() {
    let mut wizard = prefilled();
    let id = with_document(&mut wizard, DocumentType::BankPassbook);
    wizard.open_edit(id);
    wizard.set_draft_type(DocumentType::LandRecords.value());
    wizard.set_draft_number("  NEW-9 ");
    assert_eq!(wizard.save_draft(), Some(DraftSaved::Updated { id, file_replaced: false }));
    let doc = &wizard.documents[0];
    assert_eq!(doc.number, "NEW-9");
    assert_eq!(doc.document_type, DocumentType::BankPassbook, "type is fixed while editing");
    assert_eq!(doc.file.name, "doc.pdf");

    wizard.open_edit(id);
    wizard.pick_draft_file(meta("cheque.pdf", 10));
    assert_eq!(wizard.save_draft(), Some(DraftSaved::Updated { id, file_replaced: true }));
    assert_eq!(wizard.documents[0].file.name, "cheque.pdf");
}

#[test]
fn delete_waits_for_confirmation() {
    let mut wizard = prefilled();
    let id = with_document(&mut wizard, DocumentType::AadhaarCard);
    wizard.request_delete(id);
    wizard.cancel_delete();
    assert_eq!(wizard.confirm_delete(), None);
    assert_eq!(wizard.documents.len(), 1);

    wizard.request_delete(id);
    assert_eq!(wizard.confirm_delete(), Some(id));
    assert!(wizard.documents.is_empty());
}

#[test]
fn upload_fields_carry_wire_type_and_trimmed_number() {
    let doc = StagedDocument {
        id: 1,
        document_type: DocumentType::AadhaarCard,
        number: " 1234 ".to_owned(),
        file: meta("a.pdf", 1),
    };
    assert_eq!(
        doc.upload_fields(),
        vec![("document_type", "aadhar_card".to_owned()), ("document_number", "1234".to_owned())]
    );
    assert_eq!(document_type_label("land_records"), "Copy of 7/12 and 8-A");
    assert_eq!(document_type_label("ration_card"), "ration card");
}

// =============================================================
// Submit
// =============================================================

#[test]
fn submit_jumps_back_to_first_invalid_step() {
    let mut wizard = prefilled();
    wizard.step = Step::Documents;
    wizard.set(Field::BankName, "");
    wizard.set(Field::SoilType, "");
    assert_eq!(wizard.validate_for_submit(), Err(FIX_ERRORS));
    assert_eq!(wizard.step, Step::Land);
    assert!(wizard.error(Field::BankName).is_some());
}

#[test]
fn submit_body_carries_subsidy_note_and_fields() {
    let mut wizard = prefilled();
    wizard.note = "  Need drip kit ".to_owned();
    let body = wizard.submit_body();
    assert_eq!(body["subsidy"], 7);
    assert_eq!(body["application_note"], "Need drip kit");
    assert_eq!(body["mobile"], "9876543210");
    assert_eq!(body["land_unit"], "acres");
    assert_eq!(body["ifsc"], "SBIN0001234");
}

#[test]
fn submit_is_single_flight_and_final() {
    let mut wizard = prefilled();
    assert!(wizard.begin_submit());
    assert!(!wizard.begin_submit());
    wizard.submit_failed();
    assert!(wizard.begin_submit());
    wizard.submit_succeeded(Submission { application_id: 31, failed_uploads: Vec::new() });
    assert!(!wizard.submitting);
    assert!(!wizard.begin_submit(), "a submitted application is not sent twice");
}

#[test]
fn submission_message_names_failed_uploads() {
    let ok = Submission { application_id: 31, failed_uploads: Vec::new() };
    assert_eq!(ok.reference(), "APP-31");
    assert_eq!(ok.message(), SUBMITTED);
    let partial = Submission { application_id: 31, failed_uploads: vec![DocumentType::LandRecords] };
    assert_eq!(
        partial.message(),
        "Application submitted, but these documents failed to upload: Copy of 7/12 and 8-A."
    );
}
