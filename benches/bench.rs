use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use std::collections::BTreeMap;

use avl::Tree;

#[derive(Clone)]
enum TreeEnum<K, V> {
    Avl(Tree<K, V>),
    Std(BTreeMap<K, V>),
}

impl<K, V> TreeEnum<K, V> {
    fn find(&self, k: &K) -> Option<&V>
    where
        K: Ord,
    {
        match self {
            Self::Avl(t) => t.find(k),
            Self::Std(t) => t.get(k),
        }
    }

    fn insert(&mut self, k: K, v: V)
    where
        K: Ord,
    {
        match self {
            Self::Avl(t) => {
                let _ = t.insert(k, v);
            }
            Self::Std(t) => {
                t.insert(k, v);
            }
        }
    }

    fn delete(&mut self, k: &K)
    where
        K: Ord,
    {
        match self {
            Self::Avl(t) => {
                let _ = t.delete(k);
            }
            Self::Std(t) => {
                t.remove(k);
            }
        }
    }

    fn sum_in_order(&self) -> i64
    where
        V: Copy + Into<i64>,
    {
        match self {
            Self::Avl(t) => t.in_order().map(|(_, v)| (*v).into()).sum(),
            Self::Std(t) => t.values().map(|v| (*v).into()).sum(),
        }
    }
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs tests for various sizes of the AVL
/// tree and the standard library's `BTreeMap` before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeEnum<i32, i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let avl_tree: Tree<i32, i32> = (0..num_nodes as i32).map(|x| (x, x)).collect();
        let largest_element_in_tree = *avl_tree.find_max().expect("tree isn't empty").0;
        let std_tree: BTreeMap<i32, i32> = (0..num_nodes as i32).map(|x| (x, x)).collect();

        let tree_tests = [
            ("avl", TreeEnum::Avl(avl_tree)),
            ("btreemap", TreeEnum::Std(std_tree)),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _value = black_box(tree.find(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        tree.delete(&i);
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1, i + 1);
    });

    bench_helper(c, "find-miss", |tree, i| {
        let _value = black_box(tree.find(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        tree.delete(&(i + 1));
    });

    bench_helper(c, "in-order", |tree, _| {
        let _sum = black_box(tree.sum_in_order());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
