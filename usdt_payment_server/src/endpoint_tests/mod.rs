mod collections;
mod helpers;
mod mocks;
