//! 端到端: 临时 JAR -> 模块图 -> DOT 文件

use archive::{Archive, Manifest};
use modgraph::{Cluster, DotGenerator, ModuleAnalyzer};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

const CLASSES: &[&str] = &[
    "org/apache/commons/math3/linear/RealMatrix.class",
    "org/apache/commons/math3/linear/ArrayRealVector.class",
    "org/apache/commons/math3/linear/ArrayRealVector$1.class",
    "org/apache/commons/math3/stat/StatUtils.class",
    "org/apache/commons/math3/stat/descriptive/moment/Mean.class",
    "org/apache/commons/math3/ml/clustering/KMeansPlusPlusClusterer.class",
    "org/apache/commons/math3/optim/linear/SimplexSolver.class",
    "org/apache/commons/math3/util/FastMath.class",
    "org/apache/commons/math3/exception/MathIllegalArgumentException.class",
    "org/apache/commons/math3/Field.class",
    "org/apache/commons/math/legacy/Old.class",
];

fn write_jar(path: &Path, manifest: Option<&str>) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();

    if let Some(text) = manifest {
        writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
        writer.write_all(text.as_bytes()).unwrap();
    }
    writer.add_directory("org/apache/commons/math3/", options).unwrap();
    for class in CLASSES {
        writer.start_file(*class, options).unwrap();
        writer.write_all(&[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
    }
    writer.finish().unwrap();
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_commons_math_layout() {
    let dir = tempdir().unwrap();
    let jar = dir.path().join("commons-math3-3.6.1.jar");
    write_jar(&jar, Some("Manifest-Version: 1.0\r\nBundle-Name: Apache Commons Math\r\n\r\n"));

    let archive = Archive::open(&jar).unwrap();
    let analyzer = ModuleAnalyzer::new();
    let classification = analyzer.classify(&archive);

    // Field.class 直接在根命名空间下, 第 5 段就是类名
    assert_eq!(
        classification.modules,
        set(&["Field", "exception", "linear", "ml", "optim", "stat", "util"])
    );

    let graph = analyzer.synthesize(&archive);
    assert_eq!(graph.dependencies("util"), Some(&set(&["exception"])));
    assert_eq!(graph.dependencies("exception"), Some(&set(&["util"])));
    assert_eq!(
        graph.dependencies("ml"),
        Some(&set(&["exception", "linear", "optim", "stat", "util"]))
    );
    assert_eq!(
        graph.dependencies("optim"),
        Some(&set(&["analysis", "exception", "linear", "util"]))
    );

    let out = dir.path().join("modules.dot");
    let dot = DotGenerator::new().emit(&graph, &out).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), dot);

    // analysis 与 distribution 不在归档中, 不画边
    assert!(!dot.contains("\"analysis\""));
    assert!(!dot.contains("\"distribution\""));
    assert!(dot.contains("\"ml\" -> \"optim\";"));

    assert_eq!(DotGenerator::members(&graph, Cluster::Basic), vec!["exception", "util"]);
    assert_eq!(
        DotGenerator::members(&graph, Cluster::Advanced),
        vec!["ml", "optim", "stat"]
    );
}

#[test]
fn test_emit_overwrites_and_is_stable() {
    let dir = tempdir().unwrap();
    let jar = dir.path().join("a.jar");
    write_jar(&jar, None);
    let out = dir.path().join("modules.dot");
    fs::write(&out, "stale content that is much longer than anything else ".repeat(100)).unwrap();

    let archive = Archive::open(&jar).unwrap();
    let graph = ModuleAnalyzer::new().synthesize(&archive);
    let generator = DotGenerator::new().with_title(archive.name());

    let first = generator.emit(&graph, &out).unwrap();
    let second = generator.emit(&graph, &out).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&out).unwrap(), first);
    assert!(!first.contains("stale"));
}

#[test]
fn test_manifest_does_not_affect_graph() {
    let dir = tempdir().unwrap();
    let with = dir.path().join("with.jar");
    let without = dir.path().join("without.jar");
    write_jar(&with, Some("Manifest-Version: 1.0\n\n"));
    write_jar(&without, None);

    let with = Archive::open(&with).unwrap();
    let without = Archive::open(&without).unwrap();

    assert!(without.manifest().is_none());
    assert_eq!(without.manifest().cloned().unwrap_or_default(), Manifest::default());

    let analyzer = ModuleAnalyzer::new();
    assert_eq!(analyzer.synthesize(&with), analyzer.synthesize(&without));
}

#[test]
fn test_empty_archive_emits_preamble_only() {
    let dir = tempdir().unwrap();
    let jar = dir.path().join("empty.jar");
    zip::ZipWriter::new(File::create(&jar).unwrap()).finish().unwrap();

    let archive = Archive::open(&jar).unwrap();
    let analyzer = ModuleAnalyzer::new();
    assert!(analyzer.classify(&archive).modules.is_empty());

    let graph = analyzer.synthesize(&archive);
    assert!(graph.is_empty());

    let out = dir.path().join("empty.dot");
    let dot = DotGenerator::new().emit(&graph, &out).unwrap();
    assert!(!dot.contains("fillcolor="));
    assert!(!dot.contains("->"));
    assert!(dot.contains("node ["));
}
