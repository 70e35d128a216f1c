use distparade::{
    CatalogEntry, DelayPool, DistributionSpec, Error, NoPause, Parade, Typewriter,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn run_to_string(parade: &Parade, seed: u64) -> Result<String, (Error, String)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pool = DelayPool::generate(0.0, 0.0, 1, &mut rng).unwrap();
    let mut tw = Typewriter::new(Vec::new(), NoPause);
    let result = parade.run(&pool, &mut tw, &mut rng);
    let text = String::from_utf8(tw.into_inner()).unwrap();
    match result {
        Ok(()) => Ok(text),
        Err(err) => Err((err, text)),
    }
}

#[test]
fn default_parade_renders_every_entry_in_order() {
    let parade = Parade::builder().samples(300).width(20).build();
    let text = run_to_string(&parade, 42).unwrap();

    assert!(text.starts_with("\n== A Parade of Distributions ==\n"));
    assert!(text.ends_with("\n\n"));

    let titles = [
        "(1) Normal Distribution\n=======================\nmu 0.0 and sigma 1.0\n",
        "(2) Normal Distribution\n=======================\nmu 0.0 and sigma 5.0\n",
        "(3) Normal Distribution\n=======================\nmu 0.0 and sigma 0.1\n",
        "(4) Gamma Distribution\n======================\nalpha 2 and beta 1\n",
        "(5) Mixture Distribution\n========================\n\n",
    ];
    let positions: Vec<usize> = titles
        .iter()
        .map(|t| text.find(t).unwrap_or_else(|| panic!("missing header {t:?}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(text.matches("Bin size:").count(), 5);
}

#[test]
fn numbering_spans_families() {
    let parade = Parade::builder()
        .entry(CatalogEntry::new(DistributionSpec::gamma(1.0, 2.0)))
        .entry(CatalogEntry::named("Wide", DistributionSpec::normal(0.0, 10.0)))
        .samples(50)
        .bins(4)
        .build();
    let text = run_to_string(&parade, 1).unwrap();
    assert!(text.contains("(1) Gamma Distribution"));
    assert!(text.contains("(2) Wide\n========\n"));
}

#[test]
fn same_seed_same_parade() {
    let parade = Parade::builder().samples(100).bins(8).build();
    assert_eq!(run_to_string(&parade, 77).unwrap(), run_to_string(&parade, 77).unwrap());
}

#[test]
fn first_failure_aborts_the_run() {
    let parade = Parade::builder()
        .entry(CatalogEntry::new(DistributionSpec::normal(0.0, 1.0)))
        .entry(CatalogEntry::new(DistributionSpec::normal(0.0, -1.0)))
        .entry(CatalogEntry::new(DistributionSpec::gamma(2.0, 1.0)))
        .samples(100)
        .build();

    let (err, text) = run_to_string(&parade, 3).unwrap_err();
    match &err {
        Error::Entry { title, source } => {
            assert_eq!(title, "(2) Normal Distribution");
            assert!(matches!(**source, Error::InvalidParameter { name: "sigma", .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().starts_with("(2) Normal Distribution: invalid parameter sigma"));
    assert!(text.contains("(1) Normal Distribution"));
    assert!(!text.contains("(3) Gamma Distribution"));
}

#[test]
fn zero_samples_is_empty_input() {
    let parade = Parade::builder().samples(0).build();
    let (err, _) = run_to_string(&parade, 0).unwrap_err();
    assert!(matches!(err.root(), Error::EmptyInput));
}

#[test]
fn empty_catalog_prints_only_banner() {
    let parade = Parade::builder().entries(Vec::new()).build();
    let text = run_to_string(&parade, 0).unwrap();
    assert_eq!(text, "\n== A Parade of Distributions ==\n\n\n");
}
