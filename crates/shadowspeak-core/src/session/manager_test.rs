#[cfg(test)]
mod tests {
    use crate::error::{Result, ShadowError};
    use crate::script::{InMemoryScriptRepository, MAX_SCRIPTS, SavedScript, ScriptRepository};
    use crate::session::{SaveOutcome, SaveRejection, ScriptBinding, SessionManager};
    use crate::sentence::{SentenceEditor, SentenceUnit, is_partition};

    const TEXT: &str = "Success is not final, failure is not fatal: it is the courage to continue that counts. I never dreamed about success.";

    fn manager() -> SessionManager<InMemoryScriptRepository> {
        SessionManager::with_repository(InMemoryScriptRepository::new())
    }

    fn saved_id(outcome: SaveOutcome) -> String {
        match outcome {
            SaveOutcome::Saved(script) => script.id,
            SaveOutcome::Rejected(reason) => panic!("save rejected: {reason:?}"),
        }
    }

    // Repository that refuses every write
    struct ReadOnlyRepository(Vec<SavedScript>);

    impl ScriptRepository for ReadOnlyRepository {
        fn read_all(&self) -> Result<Vec<SavedScript>> {
            Ok(self.0.clone())
        }

        fn write_all(&mut self, _scripts: &[SavedScript]) -> Result<()> {
            Err(ShadowError::io("storage unavailable"))
        }
    }

    #[test]
    fn test_start_segments_and_unbinds() {
        let mut manager = manager();
        assert_eq!(manager.start(TEXT), 2);
        assert_eq!(manager.sentences()[1], "I never dreamed about success.");
        assert_eq!(manager.binding(), &ScriptBinding::Unsaved);
    }

    #[test]
    fn test_save_as_binds_session() {
        let mut manager = manager();
        manager.start(TEXT);

        let id = saved_id(manager.save_as("  Churchill ").unwrap());

        assert!(manager.binding().is_bound_to(&id));
        assert_eq!(manager.scripts()[0].name, "Churchill");
        assert_eq!(manager.scripts()[0].sentences, manager.units());
    }

    #[test]
    fn test_save_as_rejections() {
        let mut manager = manager();
        assert_eq!(
            manager.save_as("Empty").unwrap(),
            SaveOutcome::Rejected(SaveRejection::EmptySession)
        );

        manager.start(TEXT);
        assert_eq!(
            manager.save_as("   ").unwrap(),
            SaveOutcome::Rejected(SaveRejection::InvalidName)
        );
        assert_eq!(
            manager.save_as(&"n".repeat(51)).unwrap(),
            SaveOutcome::Rejected(SaveRejection::InvalidName)
        );
        assert!(manager.scripts().is_empty());
        assert_eq!(manager.binding(), &ScriptBinding::Unsaved);
    }

    #[test]
    fn test_eleventh_save_is_refused() {
        let mut manager = manager();
        manager.start(TEXT);

        for i in 0..MAX_SCRIPTS {
            assert!(manager.can_save_new());
            let id = saved_id(manager.save_as(&format!("Take {i}")).unwrap());
            assert_eq!(manager.scripts().len(), i + 1);
            assert_eq!(manager.scripts()[0].id, id);
        }

        assert!(!manager.can_save_new());
        assert_eq!(
            manager.save_as("Take 11").unwrap(),
            SaveOutcome::Rejected(SaveRejection::StoreFull)
        );
        assert_eq!(manager.scripts().len(), MAX_SCRIPTS);
        assert_eq!(manager.store().repository().stored().len(), MAX_SCRIPTS);
    }

    #[test]
    fn test_update_bound_writes_edits() {
        let mut manager = manager();
        manager.start(TEXT);
        assert!(!manager.update_bound().unwrap());

        let id = saved_id(manager.save_as("Talk").unwrap());
        assert!(manager.merge(0));
        assert!(manager.update_bound().unwrap());

        let stored = manager.store().get(&id).unwrap();
        assert_eq!(stored.sentences.len(), 1);
        assert_eq!(stored.sentences[0].original_indices, vec![0, 1]);
    }

    #[test]
    fn test_delete_clears_matching_binding_only() {
        let mut manager = manager();
        manager.start(TEXT);
        let first = saved_id(manager.save_as("First").unwrap());
        let second = saved_id(manager.save_as("Second").unwrap());
        assert!(manager.binding().is_bound_to(&second));

        assert!(manager.delete(&first).unwrap());
        assert!(manager.binding().is_bound_to(&second));

        assert!(manager.delete(&second).unwrap());
        assert_eq!(manager.binding(), &ScriptBinding::Unsaved);
        assert!(manager.scripts().is_empty());
    }

    #[test]
    fn test_load_replaces_session_and_binds() {
        let mut manager = manager();
        manager.start(TEXT);
        let id = saved_id(manager.save_as("Talk").unwrap());

        manager.start("Something else entirely.");
        manager.load(&id).unwrap();

        assert_eq!(manager.units().len(), 2);
        assert!(manager.binding().is_bound_to(&id));
    }

    #[test]
    fn test_load_unknown_is_not_found() {
        let mut manager = manager();
        manager.start(TEXT);
        let before = manager.session().clone();

        let err = manager.load("script-nope").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(manager.session(), &before);
    }

    #[test]
    fn test_loaded_units_are_a_copy() {
        let mut manager = manager();
        manager.start(TEXT);
        let id = saved_id(manager.save_as("Talk").unwrap());

        manager.load(&id).unwrap();
        assert!(manager.merge(0));
        assert!(manager.edit_sentence(0, "Changed."));

        assert_eq!(manager.store().load(&id).unwrap().len(), 2);
        assert_eq!(manager.store().get(&id).unwrap().sentences[0].original_indices, vec![0]);
    }

    #[test]
    fn test_reset_clears_units_and_binding() {
        let mut manager = manager();
        manager.start(TEXT);
        saved_id(manager.save_as("Talk").unwrap());

        manager.reset();
        assert!(manager.units().is_empty());
        assert_eq!(manager.binding(), &ScriptBinding::Unsaved);
        assert_eq!(manager.scripts().len(), 1);
    }

    #[test]
    fn test_editor_sheet_commit() {
        let mut manager = manager();
        manager.start("One. Two. Three.");

        let mut editor = SentenceEditor::new(manager.units());
        editor.merge(1);
        editor.merge(0);
        manager.replace_units(editor.apply());

        assert_eq!(manager.sentences(), vec!["One. Two. Three."]);
        assert!(is_partition(manager.units()));

        // cancelled sheet
        let mut editor = SentenceEditor::new(manager.units());
        editor.split(0);
        drop(editor);
        assert_eq!(manager.units().len(), 1);
    }

    #[test]
    fn test_persistence_failure_keeps_session_unsaved() {
        let mut manager = SessionManager::with_repository(ReadOnlyRepository(Vec::new()));
        manager.start(TEXT);

        let err = manager.save_as("Talk").unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(manager.binding(), &ScriptBinding::Unsaved);
        assert!(manager.scripts().is_empty());
    }

    #[test]
    fn test_load_renumbers_overlapping_indices() {
        // older clients reused the first index when splitting
        let legacy = SavedScript {
            id: "script-1700000000000".to_string(),
            name: "Legacy".to_string(),
            sentences: vec![
                SentenceUnit::original(0, "One."),
                SentenceUnit::original(0, "Two."),
            ],
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_000_000,
        };
        let mut manager =
            SessionManager::with_repository(InMemoryScriptRepository::with_scripts(vec![legacy]));

        manager.load("script-1700000000000").unwrap();
        assert!(is_partition(manager.units()));
        assert_eq!(manager.sentences(), vec!["One.", "Two."]);
        assert_eq!(manager.units()[1].id, "sentence-1");

        let mut editor = SentenceEditor::new(manager.units());
        assert!(editor.merge(0));
        manager.replace_units(editor.apply());
        assert_eq!(manager.units()[0].original_indices, vec![0, 1]);

        // stored copy untouched until an update
        assert_eq!(
            manager.store().list()[0].sentences[1].original_indices,
            vec![0]
        );
    }

    #[test]
    fn test_replace_units_renumbers_non_partition() {
        let mut manager = manager();
        manager.start(TEXT);

        let units = vec![
            SentenceUnit::original(3, "One."),
            SentenceUnit::original(3, "Two."),
        ];
        manager.replace_units(units);

        assert!(is_partition(manager.units()));
        assert!(!manager.split(0));
        assert_eq!(manager.units()[0].id, "sentence-0");
    }
}
