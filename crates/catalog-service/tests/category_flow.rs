//! End-to-end flows through the category services against the seeded store.

use std::sync::{Arc, Barrier};
use std::thread;

use catalog_core::config::catalog::CatalogConfig;
use catalog_core::traits::Repository;
use catalog_core::types::CategoryId;
use catalog_entity::category::{CategoryFilter, CreateCategory, UpdateCategory};
use catalog_service::{CategoryBrowser, CategoryService, TreeService};
use catalog_store::{CategoryRepository, MemoryCategoryRepository};

fn id(s: &str) -> CategoryId {
    CategoryId::new(s).expect("valid id")
}

fn services() -> (Arc<dyn CategoryRepository>, CategoryService, TreeService) {
    let repo: Arc<dyn CategoryRepository> =
        Arc::new(MemoryCategoryRepository::seeded().expect("seed"));
    let categories = CategoryService::new(repo.clone(), &CatalogConfig::default());
    let trees = TreeService::new(repo.clone());
    (repo, categories, trees)
}

#[test]
fn seed_forest_shape() {
    let (_, _, trees) = services();
    let forest = trees.build_forest().expect("forest");

    assert_eq!(forest.total, 6);
    assert!(forest.is_consistent());

    let roots: Vec<&str> = forest.roots.iter().map(|n| n.category.name.as_str()).collect();
    assert_eq!(roots, vec!["Men", "Women", "Accessories"]);

    let men = &forest.roots[0];
    let kids: Vec<&str> = men.children.iter().map(|n| n.category.name.as_str()).collect();
    assert_eq!(kids, vec!["T-Shirts", "Jeans"]);
    assert!(men.children.iter().all(|n| n.depth == 1));
}

#[test]
fn mutations_are_reflected_in_next_build() {
    let (_, categories, trees) = services();

    let sneakers = categories
        .create(CreateCategory::named("Sneakers").under(id("cat1")))
        .expect("create");
    categories
        .update(&id("cat4"), UpdateCategory::reparent(Some(id("cat2"))))
        .expect("move");

    let forest = trees.build_forest().expect("forest");
    let men = forest.find(&id("cat1")).expect("men");
    let men_kids: Vec<&CategoryId> = men.children.iter().map(|n| n.id()).collect();
    assert_eq!(men_kids, vec![&id("cat3"), &sneakers.id]);

    let women = forest.find(&id("cat2")).expect("women");
    assert_eq!(women.child_count(), 2);
    assert_eq!(forest.total, 7);
}

#[test]
fn cycle_attempt_leaves_store_unchanged() {
    let (repo, categories, _) = services();
    let grandchild = categories
        .create(CreateCategory::named("Graphic Tees").under(id("cat3")))
        .expect("create");
    let before = repo.find_all().expect("snapshot");

    let err = categories
        .update(&id("cat1"), UpdateCategory::reparent(Some(grandchild.id.clone())))
        .expect_err("cycle");
    assert!(err.is_validation());
    assert_eq!(repo.find_all().expect("snapshot"), before);
}

#[test]
fn crossing_moves_from_separate_services_never_form_a_cycle() {
    for _ in 0..32 {
        let (repo, left, trees) = services();
        let right = CategoryService::new(repo.clone(), &CatalogConfig::default());
        let barrier = Barrier::new(2);

        let (a, b) = thread::scope(|scope| {
            let a = scope.spawn(|| {
                barrier.wait();
                left.update(&id("cat3"), UpdateCategory::reparent(Some(id("cat4"))))
            });
            let b = scope.spawn(|| {
                barrier.wait();
                right.update(&id("cat4"), UpdateCategory::reparent(Some(id("cat3"))))
            });
            (a.join().expect("join"), b.join().expect("join"))
        });

        assert!(a.is_ok() != b.is_ok(), "exactly one move must land");
        let rejected = a.err().or(b.err()).expect("one rejection");
        assert!(rejected.is_validation());

        let forest = trees.build_forest().expect("forest");
        assert!(forest.is_consistent());
        assert!(forest.cycles.is_empty());
        assert_eq!(forest.total, 6);
    }
}

#[test]
fn delete_promotes_and_breadcrumbs_follow() {
    let (_, categories, trees) = services();

    let crumbs: Vec<String> = trees
        .get_breadcrumbs(&id("cat3"))
        .expect("crumbs")
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(crumbs, vec!["Men", "T-Shirts"]);

    categories.delete(&id("cat1")).expect("delete");

    let crumbs = trees.get_breadcrumbs(&id("cat3")).expect("crumbs");
    assert_eq!(crumbs.len(), 1);
    assert!(trees.get_breadcrumbs(&id("cat1")).expect_err("gone").is_not_found());

    let forest = trees.build_forest().expect("forest");
    assert_eq!(forest.roots.len(), 4);
    assert!(forest.is_consistent());
}

#[test]
fn browser_session_round() {
    let repo: Arc<dyn CategoryRepository> =
        Arc::new(MemoryCategoryRepository::seeded().expect("seed"));
    let mut browser = CategoryBrowser::open(repo, &CatalogConfig::default()).expect("open");

    browser.toggle(&id("cat1"));
    browser.select(&id("cat4")).expect("select");
    browser
        .update(&id("cat4"), UpdateCategory::rename("Denim"))
        .expect("rename");

    let rows = browser.visible_rows().expect("rows");
    let denim = rows.iter().find(|r| r.id == id("cat4")).expect("visible");
    assert_eq!(denim.name, "Denim");
    assert!(denim.selected);

    let listed = browser
        .categories()
        .list(&CategoryFilter::search("denim"))
        .expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].slug, "denim");
}
