//! Base-Type Aggregator.
//!
//! Constructors are grouped by result type. Within a group every parameter is
//! unified into one field table keyed by `(name, mapped type)`; a key that is
//! already present keeps its index. Indices are assigned by folding the
//! constructors in predicate order, so they do not depend on where the
//! constructors sit in the schema.

use crate::{
    codec::CodecGen,
    config::GeneratorConfig,
    error::{ErrorKind, GenerateError},
    ident::{disambiguated, message_name},
    ir::{BaseType, Field, FieldRef, MessageShape, TypeTree},
    map::{FieldType, map},
};
use indexmap::{IndexMap, IndexSet};
use tlgen_schema::node::Constructor;
use tracing::debug;

///
/// TypeAggregator
///
/// Per-run state; base types keep the order of their first constructor.
///

pub struct TypeAggregator<'a> {
    config: &'a GeneratorConfig,
    groups: IndexMap<String, Vec<Mapped<'a>>>,
}

// a constructor with its parameter types already mapped
struct Mapped<'a> {
    ctor: &'a Constructor,
    types: Vec<Option<FieldType>>,
}

impl<'a> TypeAggregator<'a> {
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            groups: IndexMap::new(),
        }
    }

    pub fn add(&mut self, ctor: &'a Constructor) -> Result<(), GenerateError> {
        let types = ctor
            .params
            .iter()
            .map(|p| map(&p.ty))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|kind| kind.at(ctor.source_line()))?;

        self.groups
            .entry(message_name(&ctor.result_type))
            .or_default()
            .push(Mapped { ctor, types });

        Ok(())
    }

    pub fn finish(self) -> Result<TypeTree, GenerateError> {
        let mut base_types = Vec::with_capacity(self.groups.len());
        for (name, group) in &self.groups {
            base_types.push(self.build(name, group)?);
        }

        Ok(TypeTree { base_types })
    }

    fn build(&self, name: &str, group: &[Mapped<'a>]) -> Result<BaseType, GenerateError> {
        // fold in canonical order
        let mut order: Vec<&Mapped> = group.iter().collect();
        order.sort_by(|a, b| {
            (a.ctor.predicate.as_str(), a.ctor.id).cmp(&(b.ctor.predicate.as_str(), b.ctor.id))
        });

        let mut table: IndexSet<(&str, &FieldType)> = IndexSet::new();
        for mapped in &order {
            for (param, ty) in mapped.ctor.params.iter().zip(&mapped.types) {
                if let Some(ty) = ty {
                    table.insert((param.name.as_str(), ty));
                }
            }
        }

        let mut fields: Vec<Field> = table
            .iter()
            .enumerate()
            .map(|(index, (field, ty))| Field {
                index,
                name: (*field).to_string(),
                ty: (*ty).clone(),
            })
            .collect();

        rename_collisions(name, &mut fields);
        check_unambiguous(name, &fields).map_err(|kind| {
            let line = order.first().map(|m| m.ctor.source_line()).unwrap_or_default();
            kind.at(line)
        })?;

        // shapes in schema order, against the final names
        let mut constructors = Vec::with_capacity(group.len());
        for mapped in group {
            constructors.push(self.shape(mapped, &table, &fields)?);
        }

        debug!(
            base_type = name,
            fields = fields.len(),
            constructors = constructors.len(),
            "aggregated base type"
        );

        Ok(BaseType {
            name: name.to_string(),
            fields,
            constructors,
        })
    }

    fn shape(
        &self,
        mapped: &Mapped<'a>,
        table: &IndexSet<(&str, &FieldType)>,
        fields: &[Field],
    ) -> Result<MessageShape, GenerateError> {
        let ctor = mapped.ctor;
        let mut names = Vec::with_capacity(ctor.params.len());
        let mut refs = Vec::new();

        for (param, ty) in ctor.params.iter().zip(&mapped.types) {
            let Some(ty) = ty else {
                names.push(param.name.clone());
                continue;
            };

            // every mapped parameter was inserted above
            let Some(index) = table.get_index_of(&(param.name.as_str(), ty)) else {
                return Err(ErrorKind::AmbiguousField {
                    base_type: message_name(&ctor.result_type),
                    field: param.name.clone(),
                }
                .at(ctor.source_line()));
            };

            let field = &fields[index];
            names.push(field.name.clone());
            refs.push(FieldRef {
                index,
                name: field.name.clone(),
                ty: field.ty.clone(),
            });
        }

        let (encode, decode) = CodecGen::new(&ctor.params, &names, self.config.flag_bits)
            .fragments()
            .map_err(|kind| kind.at(ctor.source_line()))?;

        Ok(MessageShape {
            predicate: message_name(&ctor.predicate),
            id: ctor.id,
            fields: refs,
            encode,
            decode,
            line: ctor.source_line(),
        })
    }
}

// rename_collisions
// a name shared by entries of different types becomes `name_<index + 1>` on every entry
fn rename_collisions(base_type: &str, fields: &mut [Field]) {
    let mut by_name: IndexMap<String, Vec<usize>> = IndexMap::new();
    for field in fields.iter() {
        by_name.entry(field.name.clone()).or_default().push(field.index);
    }

    for (name, indices) in by_name {
        if indices.len() < 2 {
            continue;
        }

        for index in indices {
            let renamed = disambiguated(&name, index);
            debug!(base_type, field = %name, renamed = %renamed, "renamed colliding field");
            fields[index].name = renamed;
        }
    }
}

fn check_unambiguous(base_type: &str, fields: &[Field]) -> Result<(), ErrorKind> {
    let mut seen = IndexSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(ErrorKind::AmbiguousField {
                base_type: base_type.to_string(),
                field: field.name.clone(),
            });
        }
    }

    Ok(())
}

///
/// TESTS
///
