pub mod pico_client;
