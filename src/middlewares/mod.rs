pub mod startup_guard;
