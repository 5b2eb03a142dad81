#[cfg(test)]
#[suitest::suite(registration_workflow_tests)]
#[suitest::suite_cfg(sequential = true)]
mod registration_workflow_tests {
    use std::sync::atomic::Ordering;

    use suitest::before_all;
    use uuid::Uuid;

    use crate::{
        app::test::{date, seed_file, seed_masters, MemoryRepo},
        core::{
            model::master::{Category, Company, Rack},
            repo::file::FileRepo,
            service::registration::{Registration, Submission},
        },
    };

    #[before_all]
    async fn setup() -> MemoryRepo {
        let repo = MemoryRepo::default();
        repo
    }

    async fn loaded(repo: &MemoryRepo) -> Registration<MemoryRepo> {
        let mut registration = Registration::new(repo.clone(), date("2025-01-03"));
        registration.load().await;
        registration
    }

    fn fill(
        registration: &mut Registration<MemoryRepo>,
        name: &str,
        masters: (&Company, &Rack, &Category),
    ) {
        let (company, rack, category) = masters;

        registration.form.name = name.to_string();
        registration.form.creator_name = "Maya".to_string();
        registration.form.company_id = Some(company.id);
        registration.form.rack_id = Some(rack.id);
        registration.form.category_id = Some(category.id);
    }

    #[test]
    async fn registering_displays_the_code_and_resets_the_form(repo: MemoryRepo) {
        let (company, rack, category) =
            seed_masters(&repo, "Fincorp", "R02", ("INV", "Invoices")).await;
        let mut registration = loaded(&repo).await;

        fill(&mut registration, "Invoice Batch 1", (&company, &rack, &category));
        let today = date("2025-01-03");
        registration.submit(today).await;

        assert_eq!(
            &Submission::Success("FIN-R02-INV-0001".to_string()),
            registration.submission()
        );

        // Form back to defaults with today's date.
        assert_eq!("", registration.form.name);
        assert_eq!("", registration.form.creator_name);
        assert_eq!(today, registration.form.creation_date);
        assert_eq!(None, registration.form.company_id);

        // The list was refreshed and shows the new file first.
        let newest = registration.files().next().unwrap();
        assert_eq!("FIN-R02-INV-0001", newest.reference_code);
        assert_eq!("Invoice Batch 1", newest.name);
    }

    #[test]
    async fn sequence_increments_per_master_combination(repo: MemoryRepo) {
        let acme = seed_masters(&repo, "A.c.m.e Holdings", "R01", ("GEN", "General")).await;

        let first = seed_file(&repo, "Supplier Contracts", (&acme.0, &acme.1, &acme.2)).await;
        let second = seed_file(&repo, "Leases", (&acme.0, &acme.1, &acme.2)).await;

        assert_eq!("ACM-R01-GEN-0001", first.reference_code);
        assert_eq!("ACM-R01-GEN-0002", second.reference_code);
    }

    #[test]
    async fn deleted_codes_are_never_reissued(repo: MemoryRepo) {
        let bolt = seed_masters(&repo, "Boltwerk", "R03", ("HR", "Personnel")).await;

        let first = seed_file(&repo, "Onboarding 2024", (&bolt.0, &bolt.1, &bolt.2)).await;
        let second = seed_file(&repo, "Onboarding 2025", (&bolt.0, &bolt.1, &bolt.2)).await;
        assert_eq!("BOL-R03-HR-0001", first.reference_code);
        assert_eq!("BOL-R03-HR-0002", second.reference_code);

        repo.delete_file(first.id).await.unwrap();

        let third = seed_file(&repo, "Offboarding", (&bolt.0, &bolt.1, &bolt.2)).await;
        assert_eq!("BOL-R03-HR-0003", third.reference_code);
    }

    #[test]
    async fn empty_name_is_rejected_without_a_store_call(repo: MemoryRepo) {
        let (company, rack, category) =
            seed_masters(&repo, "Fincorp", "R02", ("INV", "Invoices")).await;
        let mut registration = loaded(&repo).await;

        fill(&mut registration, "   ", (&company, &rack, &category));
        let before = repo.total_calls();
        registration.submit(date("2025-01-03")).await;

        assert!(matches!(registration.submission(), Submission::Failed(_)));
        assert_eq!(before, repo.total_calls());

        // Entered values survive for retry.
        assert_eq!("Maya", registration.form.creator_name);
        assert_eq!(Some(company.id), registration.form.company_id);
    }

    #[test]
    async fn unselected_masters_are_rejected_without_a_store_call(repo: MemoryRepo) {
        let mut registration = loaded(&repo).await;

        registration.form.name = "Orphan".to_string();
        registration.form.creator_name = "Maya".to_string();

        let before = repo.total_calls();
        registration.submit(date("2025-01-03")).await;

        assert!(matches!(registration.submission(), Submission::Failed(_)));
        assert_eq!(before, repo.total_calls());
    }

    #[test]
    async fn failed_create_preserves_the_operators_values(repo: MemoryRepo) {
        let (company, rack, category) =
            seed_masters(&repo, "Fincorp", "R02", ("INV", "Invoices")).await;
        let mut registration = loaded(&repo).await;

        fill(&mut registration, "Invoice Batch 1", (&company, &rack, &category));

        repo.fail_writes.store(true, Ordering::SeqCst);
        registration.submit(date("2025-01-03")).await;
        repo.fail_writes.store(false, Ordering::SeqCst);

        assert_eq!(
            &Submission::Failed("Failed to create file. Please check input.".to_string()),
            registration.submission()
        );
        assert_eq!("Invoice Batch 1", registration.form.name);
        assert_eq!(Some(category.id), registration.form.category_id);
    }

    #[test]
    async fn an_edit_dismisses_the_previous_outcome(repo: MemoryRepo) {
        let (company, rack, category) =
            seed_masters(&repo, "Fincorp", "R02", ("INV", "Invoices")).await;
        let mut registration = loaded(&repo).await;

        fill(&mut registration, "Invoice Batch 1", (&company, &rack, &category));
        registration.submit(date("2025-01-03")).await;
        assert!(matches!(registration.submission(), Submission::Success(_)));

        registration.edited();
        assert_eq!(&Submission::Idle, registration.submission());
    }

    #[test]
    async fn deletion_takes_effect_only_after_confirmation(repo: MemoryRepo) {
        let (company, rack, category) =
            seed_masters(&repo, "Fincorp", "R02", ("INV", "Invoices")).await;
        let file = seed_file(&repo, "To Shred", (&company, &rack, &category)).await;
        let mut registration = loaded(&repo).await;

        let exists = |files: &[crate::core::model::file::File], id: Uuid| {
            files.iter().any(|f| f.id == id)
        };

        registration.request_delete(file.id);
        assert!(exists(&repo.list_files().await.unwrap(), file.id));

        // Backing out disarms; a later confirm is a no-op.
        registration.cancel_delete();
        registration.confirm_delete().await;
        assert!(exists(&repo.list_files().await.unwrap(), file.id));

        registration.request_delete(file.id);
        registration.confirm_delete().await;
        assert!(!exists(&repo.list_files().await.unwrap(), file.id));
        assert!(!registration.files().any(|f| f.id == file.id));
    }
}
