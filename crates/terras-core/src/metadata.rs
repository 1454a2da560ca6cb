use crate::model::{Metadata, PriceRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Enumerate the distinct years, levels, categories, regions and
/// per-level territories of a record set. Empty strings are not listed.
pub fn build_metadata(records: &[PriceRecord]) -> Metadata {
    let mut anos = BTreeSet::new();
    let mut niveis = BTreeSet::new();
    let mut categorias = BTreeSet::new();
    let mut subcategorias = BTreeSet::new();
    let mut regioes = BTreeSet::new();
    let mut mesorregioes = BTreeSet::new();
    let mut territorios: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    fn insert<'a>(set: &mut BTreeSet<&'a str>, value: &'a str) {
        if !value.is_empty() {
            set.insert(value);
        }
    }

    fn owned(set: BTreeSet<&str>) -> Vec<String> {
        set.into_iter().map(str::to_string).collect()
    }

    for r in records {
        if let Some(ano) = r.ano {
            anos.insert(ano);
        }
        insert(&mut niveis, &r.nivel);
        insert(&mut categorias, &r.categoria);
        insert(&mut subcategorias, &r.subcategoria);
        insert(&mut regioes, &r.regiao);
        insert(&mut mesorregioes, &r.mesorregiao);
        if !r.nivel.is_empty() && !r.territorio.is_empty() {
            territorios
                .entry(r.nivel.clone())
                .or_default()
                .insert(r.territorio.clone());
        }
    }

    Metadata {
        ano_min: anos.first().copied().unwrap_or(0),
        ano_max: anos.last().copied().unwrap_or(0),
        anos: anos.into_iter().collect(),
        niveis: owned(niveis),
        categorias: owned(categorias),
        subcategorias: owned(subcategorias),
        regioes: owned(regioes),
        mesorregioes: owned(mesorregioes),
        territorios: territorios
            .into_iter()
            .map(|(nivel, names)| (nivel, names.into_iter().collect()))
            .collect(),
    }
}
