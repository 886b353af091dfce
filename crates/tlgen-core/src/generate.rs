use crate::{
    config::GeneratorConfig,
    error::GenerateError,
    ir::{FunctionTree, Generated, TypeTree},
    service::ServiceAggregator,
    types::TypeAggregator,
};
use tlgen_schema::node::Schema;
use tracing::info;

///
/// Generator
///
/// Entry point of a generation run. Holds only configuration; every run
/// builds its trees from scratch, so one generator can be reused.
///

#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, schema: &Schema) -> Result<Generated, GenerateError> {
        let types = self.generate_types(schema)?;
        let functions = self.generate_functions(schema)?;

        Ok(Generated { types, functions })
    }

    pub fn generate_types(&self, schema: &Schema) -> Result<TypeTree, GenerateError> {
        let mut agg = TypeAggregator::new(&self.config);
        for ctor in &schema.constructors {
            agg.add(ctor)?;
        }
        let tree = agg.finish()?;

        info!(
            constructors = schema.constructors.len(),
            base_types = tree.base_types.len(),
            "generated types"
        );

        Ok(tree)
    }

    pub fn generate_functions(&self, schema: &Schema) -> Result<FunctionTree, GenerateError> {
        let mut agg = ServiceAggregator::new(&self.config);
        for function in &schema.functions {
            agg.add(function)?;
        }
        let tree = agg.finish();

        info!(
            functions = schema.functions.len(),
            services = tree.services.len(),
            vector_wrappers = tree.vector_wrappers.len(),
            "generated functions"
        );

        Ok(tree)
    }
}
