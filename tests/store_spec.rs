use std::fs;

use recipe_keeper::models::*;
use recipe_keeper::store::{Layout, RecipeStore, StoreError};
use speculate2::speculate;

const FULL_RECIPE: &str = r#"{
  "id": "c00k1e5a",
  "name": "Crème Brûlée",
  "category": ["dessert", "french"],
  "prep_time_minutes": 20,
  "cook_time_minutes": 40,
  "total_time_minutes": 60,
  "servings": 6,
  "difficulty": "hard",
  "source": "family",
  "ingredients": [
    {"name": "cream", "quantity": 2.0, "unit": "cups", "notes": ""},
    {"name": "egg yolks", "quantity": 5.0, "unit": "", "notes": "large"}
  ],
  "instructions": ["Heat the cream.", "Whisk in the yolks.", "Bake in a water bath."],
  "notes": "Torch just before serving.",
  "tags": ["classic"],
  "created_date": "2023-05-01",
  "last_updated": "2023-05-02",
  "rating": 5,
  "dietary": {"vegetarian": true, "vegan": false, "gluten_free": true, "dairy_free": false},
  "status": "final",
  "needs_review": false,
  "cuisine": "french"
}"#;

fn recipe(name: &str, categories: &[&str]) -> Recipe {
    let mut recipe = Recipe::new(name);
    recipe.category = categories.iter().map(|c| c.to_string()).collect();
    recipe
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let layout = Layout::new(dir.path());
        let mut store = RecipeStore::open(layout.clone()).expect("Failed to open store");
    }

    describe "open" {
        it "creates the directory layout" {
            assert!(layout.recipes_dir().is_dir());
            assert!(layout.images_dir().is_dir());
            assert!(layout.meal_plans_dir().is_dir());
            assert!(layout.grocery_lists_dir().is_dir());
            assert!(store.is_empty());
        }
    }

    describe "load" {
        it "indexes recipes by the id inside the file" {
            fs::write(layout.recipes_dir().join("renamed.json"), FULL_RECIPE).unwrap();

            let report = store.load().expect("Load failed");
            assert_eq!(report.loaded, 1);
            assert!(store.get("c00k1e5a").is_some());
            assert!(store.get("renamed").is_none());
        }

        it "skips files without an id and keeps going" {
            fs::write(layout.recipes_dir().join("a.json"), r#"{"name": "No Id"}"#).unwrap();
            fs::write(layout.recipes_dir().join("b.json"), FULL_RECIPE).unwrap();

            let report = store.load().expect("Load failed");
            assert_eq!(report.loaded, 1);
            assert_eq!(report.skipped.len(), 1);
            assert!(matches!(report.skipped[0].1, StoreError::MissingId(_)));
            assert_eq!(store.len(), 1);
        }

        it "skips malformed JSON and keeps going" {
            fs::write(layout.recipes_dir().join("bad.json"), "{ nope").unwrap();
            fs::write(layout.recipes_dir().join("good.json"), FULL_RECIPE).unwrap();

            let report = store.load().expect("Load failed");
            assert_eq!(report.loaded, 1);
            assert!(matches!(report.skipped[0].1, StoreError::Malformed { .. }));
        }

        it "ignores files that are not JSON" {
            fs::write(layout.recipes_dir().join("readme.txt"), "hello").unwrap();
            let report = store.load().expect("Load failed");
            assert_eq!(report.loaded, 0);
            assert!(report.skipped.is_empty());
        }
    }

    describe "save" {
        it "assigns a short id and stamps dates" {
            let saved = store.save(Recipe::new("Toast")).expect("Save failed");

            assert_eq!(saved.id.len(), 8);
            assert!(saved.created_date.is_some());
            assert_eq!(saved.created_date, saved.last_updated);
            assert!(layout.recipe_path(&saved.id).is_file());
            assert_eq!(store.get(&saved.id), Some(&saved));
        }

        it "keeps an existing id and created date" {
            let mut recipe = Recipe::new("Toast");
            recipe.id = "t0a5t000".to_string();
            recipe.created_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1);

            let saved = store.save(recipe).expect("Save failed");
            assert_eq!(saved.id, "t0a5t000");
            assert_eq!(saved.created_date, chrono::NaiveDate::from_ymd_opt(2020, 1, 1));
            assert_ne!(saved.last_updated, saved.created_date);
        }

        it "overwrites the file on a second save" {
            let saved = store.save(Recipe::new("Toast")).expect("Save failed");
            let mut edited = saved.clone();
            edited.name = "Better Toast".to_string();
            store.save(edited).expect("Save failed");

            let mut reopened = RecipeStore::open(layout.clone()).expect("Reopen failed");
            reopened.load().expect("Load failed");
            assert_eq!(reopened.len(), 1);
            assert_eq!(reopened.require(&saved.id).unwrap().name, "Better Toast");
        }

        it "round-trips a full recipe file" {
            fs::write(layout.recipes_dir().join("c00k1e5a.json"), FULL_RECIPE).unwrap();
            store.load().expect("Load failed");
            let original = store.require("c00k1e5a").unwrap().clone();

            store.save(original.clone()).expect("Save failed");
            let reopened = RecipeStore::open(layout.clone()).expect("Reopen failed");
            let mut round_tripped = reopened.require("c00k1e5a").unwrap().clone();
            round_tripped.last_updated = original.last_updated;

            assert_eq!(round_tripped, original);
            assert_eq!(round_tripped.extra.get("cuisine").and_then(|v| v.as_str()), Some("french"));
        }

        it "round-trips an integer quantity as the same number" {
            fs::write(
                layout.recipes_dir().join("1ntqty00.json"),
                r#"{"id": "1ntqty00", "name": "Scones", "ingredients": [{"name": "eggs", "quantity": 2}]}"#,
            )
            .unwrap();
            store.load().expect("Load failed");
            let original = store.require("1ntqty00").unwrap().clone();
            assert_eq!(original.ingredients[0].quantity, 2.0);

            store.save(original.clone()).expect("Save failed");
            let reopened = RecipeStore::open(layout.clone()).expect("Reopen failed");
            let round_tripped = reopened.require("1ntqty00").unwrap();
            assert_eq!(round_tripped.ingredients, original.ingredients);

            let raw: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(layout.recipe_path("1ntqty00")).unwrap()).unwrap();
            assert_eq!(raw["ingredients"][0]["quantity"].as_f64(), Some(2.0));
        }

        it "writes indented JSON with unescaped non-ASCII" {
            fs::write(layout.recipes_dir().join("c00k1e5a.json"), FULL_RECIPE).unwrap();
            store.load().expect("Load failed");
            let recipe = store.require("c00k1e5a").unwrap().clone();
            store.save(recipe).expect("Save failed");

            let raw = fs::read_to_string(layout.recipe_path("c00k1e5a")).unwrap();
            assert!(raw.starts_with("{\n  \"id\": \"c00k1e5a\",\n  \"name\": \"Crème Brûlée\""));
        }
    }

    describe "ids" {
        it "treats a blank id as absent" {
            let input = dir.path().join("blank.json");
            fs::write(&input, r#"{"id": " ", "name": "Pesto"}"#).unwrap();

            let added = store.add_from_file(&input).expect("Add failed");
            assert_eq!(added.id.len(), 8);
            assert!(!added.id.contains(' '));

            let reopened = RecipeStore::open(layout.clone()).expect("Reopen failed");
            assert_eq!(reopened.require(&added.id).unwrap().name, "Pesto");
        }

        it "rejects an id that would leave the data directory" {
            let input = dir.path().join("escape.json");
            fs::write(&input, r#"{"id": "../escaped", "name": "Pesto"}"#).unwrap();

            let err = store.add_from_file(&input).unwrap_err();
            assert!(matches!(err, StoreError::InvalidId(ref id) if id == "../escaped"));
            assert!(!dir.path().join("escaped.json").exists());
            assert!(store.is_empty());
        }

        it "rejects separators in either direction" {
            for id in ["a/b", "a\\b", ".."] {
                let mut recipe = Recipe::new("Toast");
                recipe.id = id.to_string();
                assert!(matches!(store.save(recipe), Err(StoreError::InvalidId(_))), "{id}");
            }
        }

        it "skips a file whose id contains a path" {
            fs::write(
                layout.recipes_dir().join("sneaky.json"),
                r#"{"id": "../sneaky", "name": "Sneaky"}"#,
            )
            .unwrap();

            let report = store.load().expect("Load failed");
            assert_eq!(report.loaded, 0);
            assert!(matches!(report.skipped[0].1, StoreError::InvalidId(_)));
        }
    }

    describe "add_from_file" {
        it "adds a partial recipe with defaults" {
            let input = dir.path().join("new.json");
            fs::write(&input, r#"{"name": "Pesto", "category": ["sauce"]}"#).unwrap();

            let added = store.add_from_file(&input).expect("Add failed");
            assert_eq!(added.name, "Pesto");
            assert_eq!(added.servings, 4);
            assert_eq!(store.list(Some("sauce")).len(), 1);
        }

        it "reports a missing input file" {
            let err = store.add_from_file(&dir.path().join("missing.json")).unwrap_err();
            assert!(matches!(err, StoreError::FileNotFound(_)));
        }

        it "reports malformed input" {
            let input = dir.path().join("bad.json");
            fs::write(&input, r#"{"category": []}"#).unwrap();

            let err = store.add_from_file(&input).unwrap_err();
            assert!(matches!(err, StoreError::Malformed { .. }));
        }
    }

    describe "queries" {
        before {
            store.save(recipe("Pad Thai", &["noodles", "thai"])).unwrap();
            store.save(recipe("Green Curry", &["thai"])).unwrap();
            store.save(recipe("Carbonara", &["pasta"])).unwrap();
        }

        it "filters by category" {
            assert_eq!(store.list(None).len(), 3);
            assert_eq!(store.list(Some("thai")).len(), 2);
            assert!(store.list(Some("dessert")).is_empty());
        }

        it "lists sorted distinct categories with counts" {
            assert_eq!(store.categories(), ["noodles", "pasta", "thai"]);
            assert_eq!(
                store.category_counts(),
                vec![
                    ("noodles".to_string(), 1),
                    ("pasta".to_string(), 1),
                    ("thai".to_string(), 2),
                ]
            );
        }

        it "searches names and categories case-insensitively" {
            assert_eq!(store.search("CURRY").len(), 1);
            assert_eq!(store.search("thai").len(), 2);
            assert!(store.search("sushi").is_empty());
        }

        it "returns NotFound for an unknown id" {
            let err = store.require("nope").unwrap_err();
            assert!(matches!(err, StoreError::NotFound { kind: "Recipe", .. }));
        }
    }

    describe "stats" {
        it "is all zeros for an empty store" {
            let stats = store.stats().expect("Stats failed");
            assert_eq!(stats.total_recipes, 0);
            assert_eq!(stats.avg_prep_time, 0.0);
            assert_eq!(stats.meal_plans_count, 0);
        }

        it "averages prep and cook times" {
            let mut a = Recipe::new("A");
            a.prep_time_minutes = 10;
            a.cook_time_minutes = 30;
            let mut b = Recipe::new("B");
            b.prep_time_minutes = 20;
            b.cook_time_minutes = 50;
            store.save(a).unwrap();
            store.save(b).unwrap();

            let stats = store.stats().expect("Stats failed");
            assert_eq!(stats.total_recipes, 2);
            assert_eq!(stats.avg_prep_time, 15.0);
            assert_eq!(stats.avg_cook_time, 40.0);
        }
    }

    describe "export" {
        it "writes every recipe to one file" {
            store.save(Recipe::new("A")).unwrap();
            store.save(Recipe::new("B")).unwrap();
            let path = dir.path().join("export-all.json");

            let export = store.export(&path).expect("Export failed");
            assert_eq!(export.total_recipes, 2);

            let raw: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
            assert_eq!(raw["total_recipes"], 2);
            assert_eq!(raw["recipes"].as_array().unwrap().len(), 2);
        }
    }
}
