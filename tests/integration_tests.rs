// Integration tests for pydeptree

mod common;

mod integration {
    mod cli_test;
    mod graph_builder_test;
    mod output_test;
}
