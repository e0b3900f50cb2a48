mod common;
mod tariff;
